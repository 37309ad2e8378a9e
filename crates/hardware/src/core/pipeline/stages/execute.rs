//! Execute (EX) Stage.
//!
//! This module implements the third and final stage of the pipeline. It performs the following:
//! 1. **Operand Resolution:** Reads `r1`, and `r2` or the immediate, from current architectural state.
//! 2. **Arithmetic Execution:** Runs the ALU and selects the flag path.
//! 3. **Memory Access:** Computes the wrapped data address for LDR and STR.
//! 4. **Control Flow Resolution:** Computes the BEQZ and BR targets that trigger a flush.
//!
//! Execution is split in two. [`execute_stage`] is pure and describes the effects
//! as an [`ExecutionOutcome`]; [`retire`] applies them to the CPU.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::common::constants::{FIELD_MASK, JUMP_TARGET_MASK, R1_SHIFT};
use crate::common::{DataAddr, RegIdx};
use crate::core::Cpu;
use crate::core::arch::StatusRegister;
use crate::core::pipeline::latches::IdExEntry;
use crate::core::pipeline::signals::{BranchKind, FlagUpdate, OpBSrc};
use crate::core::units::alu::Alu;
use crate::core::units::alu::flags::{reduced_flags, update_flags};
use crate::isa::decode::sign_extend_6;
use crate::isa::disasm::disassemble;

/// A register file update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RegWrite {
    /// Destination register.
    pub reg: RegIdx,
    /// Value before the write.
    pub old: i8,
    /// Value written.
    pub new: i8,
}

/// A data memory update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MemWrite {
    /// Wrapped target address.
    pub addr: DataAddr,
    /// Value written.
    pub value: i8,
}

/// Architectural effects of executing one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionOutcome {
    /// Register write, if any.
    pub reg_write: Option<RegWrite>,
    /// Address read by a load.
    pub mem_read: Option<DataAddr>,
    /// Data memory write, if any.
    pub mem_write: Option<MemWrite>,
    /// Replacement status register for flag-affecting operations.
    pub flags: Option<StatusRegister>,
    /// Redirect target of a taken BEQZ or a BR.
    pub control_transfer: Option<u16>,
    /// The opcode was one of the reserved values 12-15.
    pub unknown_opcode: bool,
}

/// Resolves ALU operand B from the low 6-bit field.
fn operand_b(cpu: &Cpu, entry: &IdExEntry) -> i8 {
    let r2 = entry.decoded.r2;
    match entry.ctrl.b_src {
        OpBSrc::Reg2 => cpu.regs.read(entry.decoded.r2_reg()),
        OpBSrc::SignedImm => sign_extend_6(r2),
        OpBSrc::UnsignedImm => r2 as i8,
    }
}

/// Builds a BR target from the two register values.
///
/// `r1` supplies the high bits and `r2` the low 6 bits. The OR is taken over
/// the full unsigned byte values and then limited to the instruction address range.
#[inline]
pub const fn jump_target(high: i8, low: i8) -> u16 {
    (((high as u8 as u16) << R1_SHIFT) | (low as u8 as u16)) & JUMP_TARGET_MASK
}

/// Builds a taken BEQZ target: the instruction's own address plus one plus the unsigned offset.
#[inline]
pub const fn branch_target(pc: u16, offset: u8) -> u16 {
    pc + 1 + (offset as u16 & FIELD_MASK)
}

/// Executes one instruction against the current architectural state.
///
/// Operands are read from `cpu` at call time. Nothing is modified; pass the
/// result to [`retire`] to apply it.
///
/// # Arguments
///
/// * `cpu` - The CPU state to read operands from.
/// * `entry` - The instruction in the ID/EX latch.
///
/// # Returns
///
/// The instruction's effects. Reserved opcodes produce an outcome with only
/// `unknown_opcode` set.
pub fn execute_stage(cpu: &Cpu, entry: &IdExEntry) -> ExecutionOutcome {
    let d = &entry.decoded;
    let ctrl = &entry.ctrl;

    trace!(pc = entry.pc, "EX  {}", disassemble(entry.inst));

    if d.is_unknown() {
        warn!(
            pc = entry.pc,
            opcode = d.opcode_bits,
            "unknown opcode {:#06x}, instruction has no effect",
            entry.inst
        );
        return ExecutionOutcome {
            unknown_opcode: true,
            ..ExecutionOutcome::default()
        };
    }

    let a = cpu.regs.read(d.r1);
    let b = operand_b(cpu, entry);
    let mut out = ExecutionOutcome::default();

    if let Some(op) = ctrl.alu {
        let result = Alu::execute(op, a, b);
        out.reg_write = Some(RegWrite {
            reg: d.r1,
            old: a,
            new: result,
        });
        out.flags = match ctrl.flags {
            FlagUpdate::None => None,
            FlagUpdate::Full(kind) => Some(update_flags(result, a, b, kind)),
            FlagUpdate::Reduced => Some(reduced_flags(result)),
        };
    }

    if ctrl.mem_read {
        let addr = DataAddr::wrap(i32::from(b));
        out.mem_read = Some(addr);
        out.reg_write = Some(RegWrite {
            reg: d.r1,
            old: a,
            new: cpu.dmem.read(addr),
        });
    }

    if ctrl.mem_write {
        out.mem_write = Some(MemWrite {
            addr: DataAddr::wrap(i32::from(b)),
            value: a,
        });
    }

    out.control_transfer = match ctrl.branch {
        BranchKind::None => None,
        BranchKind::IfZero => (a == 0).then(|| branch_target(entry.pc, d.r2)),
        BranchKind::Jump => Some(jump_target(a, b)),
    };

    out
}

/// Applies an outcome to the CPU and updates the retirement statistics.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
/// * `entry` - The retiring instruction.
/// * `outcome` - Its effects, as produced by [`execute_stage`].
pub fn retire(cpu: &mut Cpu, entry: &IdExEntry, outcome: &ExecutionOutcome) {
    if let Some(w) = outcome.reg_write {
        cpu.regs.write(w.reg, w.new);
        debug!(pc = entry.pc, "{} <- {} (was {})", w.reg, w.new, w.old);
    }

    if let Some(w) = outcome.mem_write {
        cpu.dmem.write(w.addr, w.value);
        debug!(pc = entry.pc, "dmem[{}] <- {}", w.addr, w.value);
    }

    if let Some(flags) = outcome.flags {
        cpu.sreg = flags;
    }

    let stats = &mut cpu.stats;
    stats.instructions_retired += 1;
    let ctrl = &entry.ctrl;
    if outcome.unknown_opcode {
        stats.unknown_opcodes += 1;
    } else if ctrl.mem_read {
        stats.inst_load += 1;
    } else if ctrl.mem_write {
        stats.inst_store += 1;
    } else if ctrl.branch != BranchKind::None {
        stats.inst_branch += 1;
        if outcome.control_transfer.is_some() {
            stats.branches_taken += 1;
        }
    } else {
        stats.inst_alu += 1;
    }
}
