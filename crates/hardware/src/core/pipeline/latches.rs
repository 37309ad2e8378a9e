//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entries carried between the three pipeline stages:
//! Fetch → Decode → Execute.
//!
//! 1. **IF/ID:** The raw word and the address it was fetched from.
//! 2. **ID/EX:** The decoded fields and control signals, ready for the Execution Unit.
//!
//! An empty stage is represented by `None` in the owning [`Pipeline`](super::engine::Pipeline).

use serde::Serialize;

use crate::core::pipeline::signals::ControlSignals;
use crate::isa::instruction::Decoded;

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IfIdEntry {
    /// Instruction memory address the word was fetched from.
    pub pc: u16,
    /// 16-bit instruction encoding.
    pub inst: u16,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
///
/// Register operands are read in the Execute stage, not here, so an entry
/// always observes the results of every older instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IdExEntry {
    /// Instruction memory address the word was fetched from.
    pub pc: u16,
    /// 16-bit instruction encoding.
    pub inst: u16,
    /// Extracted instruction fields.
    pub decoded: Decoded,
    /// Control signals for the Execute stage.
    pub ctrl: ControlSignals,
}
