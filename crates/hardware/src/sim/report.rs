//! Human-readable and JSON views of simulator state.
//!
//! This module renders state for the CLI. It provides:
//! 1. **State Report:** PC, status register, registers, and non-zero memory as text.
//! 2. **Cycle Trace:** One cycle's stage activity as text.
//! 3. **Snapshot:** The same architectural state as a `serde` structure for JSON output.

use std::fmt;

use serde::Serialize;

use crate::core::Cpu;
use crate::core::pipeline::CycleReport;
use crate::isa::disasm::disassemble;
use crate::stats::SimStats;

/// Text rendering of the final architectural state.
///
/// # Examples
///
/// ```
/// use harvsim_core::core::Cpu;
/// use harvsim_core::sim::report::StateReport;
///
/// let cpu = Cpu::default();
/// let text = StateReport(&cpu).to_string();
/// assert!(text.contains("PC = 0 (0x0000)"));
/// assert!(text.contains("All memory locations are zero"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StateReport<'a>(pub &'a Cpu);

impl fmt::Display for StateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cpu = self.0;
        writeln!(f, "--- System State ---")?;
        writeln!(f, "PC = {} ({:#06X})", cpu.pc, cpu.pc)?;
        writeln!(f, "SREG = {}", cpu.sreg)?;

        writeln!(f, "\nRegisters:")?;
        write!(f, "{}", cpu.regs)?;

        writeln!(f, "\nData Memory (non-zero locations):")?;
        let mut empty = true;
        for (addr, val) in cpu.dmem.non_zero() {
            writeln!(f, "  [{addr}] = {val}")?;
            empty = false;
        }
        if empty {
            writeln!(f, "  All memory locations are zero")?;
        }

        writeln!(f, "\nInstruction Memory:")?;
        for (addr, word) in cpu.imem.non_zero() {
            writeln!(f, "  [{addr}] = {word:#06X}  {}", disassemble(word))?;
        }
        Ok(())
    }
}

/// Text rendering of one cycle, in pipeline order from Execute back to Fetch.
#[derive(Clone, Copy, Debug)]
pub struct CycleTrace<'a>(pub &'a CycleReport);

impl fmt::Display for CycleTrace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(f, "Clock Cycle {}:", r.cycle)?;

        if let Some(flush) = r.flush {
            writeln!(
                f,
                "  Flush: redirect from PC={} to PC={}, {} instruction(s) squashed",
                flush.source_pc, flush.target, r.squashed
            )?;
        }

        match &r.retired {
            Some(retired) => {
                let entry = &retired.entry;
                let out = &retired.outcome;
                writeln!(
                    f,
                    "  Execute: {} (PC={})",
                    disassemble(entry.inst),
                    entry.pc
                )?;
                if out.unknown_opcode {
                    writeln!(f, "    Unknown opcode: {}", entry.decoded.opcode_bits)?;
                }
                if let Some(addr) = out.mem_read {
                    writeln!(f, "    Memory read: data_memory[{addr}]")?;
                }
                if let Some(w) = out.mem_write {
                    writeln!(f, "    Memory updated: data_memory[{}] = {}", w.addr, w.value)?;
                }
                if let Some(w) = out.reg_write {
                    writeln!(
                        f,
                        "    Register updated: {} changed from {} to {}",
                        w.reg, w.old, w.new
                    )?;
                }
                if let Some(target) = out.control_transfer {
                    writeln!(f, "    Branch taken: PC updated from {} to {target}", entry.pc)?;
                }
                if let Some(sreg) = out.flags {
                    writeln!(f, "    SREG = {sreg}")?;
                }
            }
            None => writeln!(f, "  Execute: No instruction")?,
        }

        match &r.promoted {
            Some(entry) => writeln!(
                f,
                "  Decode: {} (opcode={}, r1={}, r2/imm={})",
                disassemble(entry.inst),
                entry.decoded.opcode_bits,
                entry.decoded.r1.val(),
                entry.decoded.r2
            )?,
            None => writeln!(f, "  Decode: No instruction")?,
        }

        match &r.fetched {
            Some(entry) => writeln!(
                f,
                "  Fetch: Instruction at PC={} is {:#06X}",
                entry.pc, entry.inst
            )?,
            None => writeln!(f, "  Fetch: No instruction")?,
        }
        Ok(())
    }
}

/// A non-zero data memory cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MemoryCell {
    /// Cell address.
    pub addr: usize,
    /// Cell value.
    pub value: i8,
}

/// A non-zero instruction memory word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InstructionWord {
    /// Word address.
    pub addr: usize,
    /// Raw encoding.
    pub word: u16,
    /// Disassembly of `word`.
    pub disasm: String,
}

/// Serializable copy of the architectural state and statistics.
#[derive(Clone, Debug, Serialize)]
pub struct ArchSnapshot {
    /// Program counter.
    pub pc: u16,
    /// Raw status register bits.
    pub sreg: u8,
    /// Letters of the set flags, in Z S N V C order.
    pub flags: String,
    /// R0-R63.
    pub registers: Vec<i8>,
    /// Non-zero data memory cells in address order.
    pub data_memory: Vec<MemoryCell>,
    /// Non-zero instruction memory words in address order.
    pub instruction_memory: Vec<InstructionWord>,
    /// Run statistics.
    pub stats: SimStats,
}

impl ArchSnapshot {
    /// Captures the current state of `cpu`.
    pub fn capture(cpu: &Cpu) -> Self {
        Self {
            pc: cpu.pc,
            sreg: cpu.sreg.bits(),
            flags: cpu.sreg.letters(),
            registers: cpu.regs.as_slice().to_vec(),
            data_memory: cpu
                .dmem
                .non_zero()
                .map(|(addr, value)| MemoryCell { addr, value })
                .collect(),
            instruction_memory: cpu
                .imem
                .non_zero()
                .map(|(addr, word)| InstructionWord {
                    addr,
                    word,
                    disasm: disassemble(word),
                })
                .collect(),
            stats: cpu.stats.clone(),
        }
    }
}
