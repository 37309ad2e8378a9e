//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the three stages of the
//! instruction pipeline. It includes:
//! 1. **Fetch:** Reads the next word from instruction memory at the PC.
//! 2. **Decode:** Extracts the instruction fields and generates control signals.
//! 3. **Execute:** Reads operands, runs the ALU and Flag Unit, and resolves control flow.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry points (EX stage).
pub use execute::{ExecutionOutcome, execute_stage, retire};
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
