//! Core processor implementation.
//!
//! This module contains the CPU state, the three-stage instruction pipeline,
//! the architectural status register, and the execution units.

/// Architectural components (status register).
pub mod arch;

/// CPU state and memories.
pub mod cpu;

/// Instruction pipeline implementation (controller, stages, latches, signals).
pub mod pipeline;

/// Execution units (ALU and Flag Unit).
pub mod units;

pub use self::cpu::Cpu;
