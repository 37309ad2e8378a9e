//! Pipeline control signals and operation types.
//!
//! This module defines the signals that control instruction execution. It performs:
//! 1. **Operation Classification:** Selects the ALU operation for each opcode.
//! 2. **Operand Selection:** Defines how the low 6-bit field becomes ALU operand B.
//! 3. **Memory Control:** Marks loads and stores.
//! 4. **Flag Control:** Selects the full, logic, reduced, or no-flag path.
//! 5. **Control Flow:** Marks conditional branches and jumps.

use serde::Serialize;

use crate::core::units::alu::flags::FlagOp;
use crate::isa::opcodes::Opcode;

/// ALU operation types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AluOp {
    /// 8-bit wrapping addition.
    Add,

    /// 8-bit wrapping subtraction.
    Sub,

    /// 8-bit wrapping multiplication (low 8 bits of the product).
    Mul,

    /// Bitwise AND.
    And,

    /// Bitwise XOR.
    Xor,

    /// Pass operand B through unchanged (MOVI).
    Pass,

    /// Shift left.
    Sal,

    /// Arithmetic shift right.
    Sar,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum OpBSrc {
    /// Value of the register named by the low field.
    #[default]
    Reg2,

    /// Low field sign-extended from 6 to 8 bits.
    SignedImm,

    /// Low field taken as an unsigned 0-63 value.
    UnsignedImm,
}

/// Status register update selected for an instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum FlagUpdate {
    /// Flags are left untouched.
    #[default]
    None,

    /// General path with the given carry/overflow rules.
    Full(FlagOp),

    /// Reduced Z/N path used by MUL and the shifts.
    Reduced,
}

/// Control-flow behaviour of an instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum BranchKind {
    /// Falls through to the next instruction.
    #[default]
    None,

    /// Branches to `pc + 1 + offset` when `r1` is zero.
    IfZero,

    /// Jumps unconditionally to the address built from `r1` and `r2`.
    Jump,
}

/// Control signals generated by the decode stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ControlSignals {
    /// ALU operation; `None` for instructions that don't use the ALU.
    pub alu: Option<AluOp>,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
    /// Enable write to `r1`.
    pub reg_write: bool,
    /// Enable data memory read (load into `r1`).
    pub mem_read: bool,
    /// Enable data memory write (store `r1`).
    pub mem_write: bool,
    /// Status register update.
    pub flags: FlagUpdate,
    /// Control-flow behaviour.
    pub branch: BranchKind,
}

impl ControlSignals {
    /// Generates the control signals for an opcode.
    ///
    /// Reserved opcodes (`None`) get all-inactive signals, so they retire as no-ops.
    pub const fn for_opcode(op: Option<Opcode>) -> Self {
        let Some(op) = op else {
            return Self::nop();
        };

        const fn alu_reg(alu: AluOp, b_src: OpBSrc, flags: FlagUpdate) -> ControlSignals {
            ControlSignals {
                alu: Some(alu),
                b_src,
                reg_write: true,
                flags,
                ..ControlSignals::nop()
            }
        }

        match op {
            Opcode::Add => alu_reg(AluOp::Add, OpBSrc::Reg2, FlagUpdate::Full(FlagOp::Add)),
            Opcode::Sub => alu_reg(AluOp::Sub, OpBSrc::Reg2, FlagUpdate::Full(FlagOp::Sub)),
            Opcode::Mul => alu_reg(AluOp::Mul, OpBSrc::Reg2, FlagUpdate::Reduced),
            Opcode::Movi => alu_reg(AluOp::Pass, OpBSrc::SignedImm, FlagUpdate::None),
            Opcode::Andi => alu_reg(
                AluOp::And,
                OpBSrc::SignedImm,
                FlagUpdate::Full(FlagOp::Logic),
            ),
            Opcode::Eor => alu_reg(AluOp::Xor, OpBSrc::Reg2, FlagUpdate::Full(FlagOp::Logic)),
            Opcode::Sal => alu_reg(AluOp::Sal, OpBSrc::UnsignedImm, FlagUpdate::Reduced),
            Opcode::Sar => alu_reg(AluOp::Sar, OpBSrc::UnsignedImm, FlagUpdate::Reduced),
            Opcode::Beqz => Self {
                b_src: OpBSrc::UnsignedImm,
                branch: BranchKind::IfZero,
                ..Self::nop()
            },
            Opcode::Br => Self {
                b_src: OpBSrc::Reg2,
                branch: BranchKind::Jump,
                ..Self::nop()
            },
            Opcode::Ldr => Self {
                b_src: OpBSrc::SignedImm,
                reg_write: true,
                mem_read: true,
                ..Self::nop()
            },
            Opcode::Str => Self {
                b_src: OpBSrc::SignedImm,
                mem_write: true,
                ..Self::nop()
            },
        }
    }

    /// Signals that perform no architectural change.
    pub const fn nop() -> Self {
        Self {
            alu: None,
            b_src: OpBSrc::Reg2,
            reg_write: false,
            mem_read: false,
            mem_write: false,
            flags: FlagUpdate::None,
            branch: BranchKind::None,
        }
    }
}
