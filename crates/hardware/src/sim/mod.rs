//! Simulation driver and program handling.
//!
//! Provides the assembler and loader for program text, the [`Simulator`] that
//! owns the CPU and pipeline, the observer hooks, and the state reports.
//!
//! [`Simulator`]: simulator::Simulator

/// Program text assembler.
pub mod assembler;

/// Program file loading.
pub mod loader;

/// Per-cycle and end-of-run observer hooks.
pub mod observer;

/// Text and JSON state reports.
pub mod report;

/// CPU and pipeline owner and run loop.
pub mod simulator;
