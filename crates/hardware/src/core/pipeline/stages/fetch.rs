//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline.
//! It reads the word at the current Program Counter and advances the PC by one.
//! A PC past the end of instruction memory, or a word equal to the
//! end-of-program marker, yields no instruction.

use tracing::trace;

use crate::common::constants::END_OF_PROGRAM_WORD;
use crate::core::Cpu;
use crate::core::pipeline::latches::IfIdEntry;
use crate::isa::disasm::disassemble;

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state; `pc` is incremented on success.
///
/// # Returns
///
/// The fetched entry, or `None` when the end of the program was reached. The PC
/// is left untouched in that case.
pub fn fetch_stage(cpu: &mut Cpu) -> Option<IfIdEntry> {
    let pc = cpu.pc;
    let Some(inst) = cpu
        .imem
        .fetch(pc)
        .filter(|&word| word != END_OF_PROGRAM_WORD)
    else {
        trace!(pc, "IF  end of program");
        return None;
    };

    cpu.pc = pc + 1;
    trace!(pc, inst = format_args!("{inst:#06x}"), "IF  {}", disassemble(inst));
    Some(IfIdEntry { pc, inst })
}
