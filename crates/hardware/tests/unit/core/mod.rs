//! Tests for the CPU core.


/// Pipeline stages, control hazards, and termination.
pub mod pipeline;
