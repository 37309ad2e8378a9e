//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the instruction pipeline.
//! It splits the raw word into opcode and operand fields and generates the
//! control signals for the Execute stage. Decoding never fails: reserved
//! opcodes travel down the pipeline with inactive signals.

use tracing::trace;

use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::decode::decode;
use crate::isa::disasm::disassemble;

/// Executes the instruction decode stage of the pipeline.
///
/// # Arguments
///
/// * `entry` - The instruction held in the IF/ID latch.
///
/// # Returns
///
/// The ID/EX entry to promote into the Execute stage.
pub fn decode_stage(entry: &IfIdEntry) -> IdExEntry {
    let decoded = decode(entry.inst);
    let ctrl = ControlSignals::for_opcode(decoded.opcode);

    trace!(pc = entry.pc, "ID  {}", disassemble(entry.inst));

    IdExEntry {
        pc: entry.pc,
        inst: entry.inst,
        decoded,
        ctrl,
    }
}
