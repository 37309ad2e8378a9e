//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the three-stage instruction pipeline.
//! It includes the following components:
//! 1. **Engine:** The controller that advances the stages each cycle.
//! 2. **Hazards:** Flush requests and squashing of wrong-path instructions.
//! 3. **Latches:** Inter-stage buffers for communication between pipeline stages.
//! 4. **Signals:** Control signals generated during instruction decoding.
//! 5. **Stages:** Implementation of Fetch, Decode, and Execute.

/// Per-cycle pipeline controller.
pub mod engine;

/// Control hazard handling.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute).
pub mod stages;

pub use engine::{CycleReport, Pipeline, PipelineState, Retired};
