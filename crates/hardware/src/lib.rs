//! Harvard-architecture CPU simulator library.
//!
//! This crate implements a cycle-level simulator for a small 16-bit Harvard CPU with the following:
//! 1. **Core:** A three-stage pipeline (fetch, decode, execute) with branch flush, 64 8-bit registers, and a status register.
//! 2. **Memory:** Separate 1024-word instruction memory and 2048-cell data memory.
//! 3. **ISA:** Decoding, encoding, and disassembly of the twelve 16-bit instructions.
//! 4. **Simulation:** Assembler, loader, configuration, observers, reports, and statistics.
//!
//! # Examples
//!
//! ```
//! use harvsim_core::{Config, Simulator};
//! use harvsim_core::sim::assembler::assemble;
//!
//! let program = assemble("MOVI R4 7\nADD R4 R1\n");
//! let mut sim = Simulator::new(&Config::default());
//! sim.load(&program).unwrap();
//! let summary = sim.run();
//!
//! assert!(summary.halted);
//! assert_eq!(sim.cpu.regs.as_slice()[4], 12);
//! ```

/// Common types and constants (addresses, registers, errors).
pub mod common;
/// Simulator configuration (defaults, JSON loading, validation).
pub mod config;
/// CPU core (state, pipeline, status register, ALU and Flag Unit).
pub mod core;
/// Instruction set (opcodes, decode, encode, disassembly).
pub mod isa;
/// Assembler, loader, simulator, observers, and reports.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, memories, and stats.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::simulator::Simulator;
