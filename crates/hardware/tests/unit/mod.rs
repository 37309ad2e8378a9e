//! # Unit Components
//!
//! Unit tests organized to mirror the crate's module tree.



/// Unit tests for the CPU, ALU, Flag Unit, and pipeline.
pub mod core;
