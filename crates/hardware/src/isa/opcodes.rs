//! Opcode Definitions.
//!
//! Defines the twelve operations selected by the 4-bit opcode field (bits 15-12).
//! Values 12-15 are reserved and decode as unknown.

use serde::Serialize;

/// Operand interpretation of the low 6-bit field for a given opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandForm {
    /// `Rn Rm`: the field is a second register index.
    RegReg,
    /// `Rn imm`: the field is a signed 6-bit immediate (sign-extended to 8 bits).
    RegSignedImm,
    /// `Rn imm`: the field is an unsigned 6-bit value (branch offset or shift count).
    RegUnsignedImm,
}

/// A recognized operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Opcode {
    /// `reg[r1] += reg[r2]`.
    Add = 0,
    /// `reg[r1] -= reg[r2]`.
    Sub = 1,
    /// `reg[r1] *= reg[r2]`.
    Mul = 2,
    /// `reg[r1] = imm`.
    Movi = 3,
    /// Branch to `pc + 1 + offset` if `reg[r1] == 0`.
    Beqz = 4,
    /// `reg[r1] &= imm`.
    Andi = 5,
    /// `reg[r1] ^= reg[r2]`.
    Eor = 6,
    /// Jump to `reg[r1] << 6 | reg[r2]`.
    Br = 7,
    /// Arithmetic shift left by an immediate count.
    Sal = 8,
    /// Arithmetic shift right by an immediate count.
    Sar = 9,
    /// Load from data memory.
    Ldr = 10,
    /// Store to data memory.
    Str = 11,
}

impl Opcode {
    /// All recognized opcodes in encoding order.
    pub const ALL: [Self; 12] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Movi,
        Self::Beqz,
        Self::Andi,
        Self::Eor,
        Self::Br,
        Self::Sal,
        Self::Sar,
        Self::Ldr,
        Self::Str,
    ];

    /// Maps a 4-bit opcode field to an operation, or `None` for reserved values.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0 => Self::Add,
            1 => Self::Sub,
            2 => Self::Mul,
            3 => Self::Movi,
            4 => Self::Beqz,
            5 => Self::Andi,
            6 => Self::Eor,
            7 => Self::Br,
            8 => Self::Sal,
            9 => Self::Sar,
            10 => Self::Ldr,
            11 => Self::Str,
            _ => return None,
        })
    }

    /// Returns the 4-bit encoding of this opcode.
    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns the assembler mnemonic in upper case.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Movi => "MOVI",
            Self::Beqz => "BEQZ",
            Self::Andi => "ANDI",
            Self::Eor => "EOR",
            Self::Br => "BR",
            Self::Sal => "SAL",
            Self::Sar => "SAR",
            Self::Ldr => "LDR",
            Self::Str => "STR",
        }
    }

    /// Looks up an opcode by mnemonic, ignoring ASCII case.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name))
    }

    /// Returns how the low 6-bit field is interpreted.
    pub const fn operand_form(self) -> OperandForm {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Eor | Self::Br => OperandForm::RegReg,
            Self::Movi | Self::Andi | Self::Ldr | Self::Str => OperandForm::RegSignedImm,
            Self::Beqz | Self::Sal | Self::Sar => OperandForm::RegUnsignedImm,
        }
    }
}
