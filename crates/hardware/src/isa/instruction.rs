//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions and structures for decoding
//! fields from 16-bit instruction words.
//!
//! ```text
//!  15    12 11        6 5         0
//! +--------+-----------+-----------+
//! | opcode |    r1     |  r2 / imm |
//! +--------+-----------+-----------+
//! ```

use serde::Serialize;

use crate::common::constants::{FIELD_MASK, OPCODE_MASK, OPCODE_SHIFT, R1_SHIFT};
use crate::common::reg::RegIdx;
use crate::isa::opcodes::Opcode;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the 4-bit opcode field (bits 15-12).
    fn opcode_bits(&self) -> u8;

    /// Extracts the first register field (bits 11-6).
    fn r1(&self) -> RegIdx;

    /// Extracts the low 6-bit field (bits 5-0): a second register index or an immediate.
    fn r2(&self) -> u8;
}

impl InstructionBits for u16 {
    #[inline(always)]
    fn opcode_bits(&self) -> u8 {
        ((self >> OPCODE_SHIFT) & OPCODE_MASK) as u8
    }

    #[inline(always)]
    fn r1(&self) -> RegIdx {
        RegIdx::from_field(self >> R1_SHIFT)
    }

    #[inline(always)]
    fn r2(&self) -> u8 {
        (self & FIELD_MASK) as u8
    }
}

/// Decoded instruction structure containing all extracted fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Decoded {
    /// Raw 16-bit instruction encoding.
    pub raw: u16,
    /// Raw 4-bit opcode field, kept for diagnostics of reserved opcodes.
    pub opcode_bits: u8,
    /// Recognized operation, or `None` for the reserved opcodes 12-15.
    pub opcode: Option<Opcode>,
    /// First register field.
    pub r1: RegIdx,
    /// Second register index or 6-bit immediate, uninterpreted.
    pub r2: u8,
}

impl Decoded {
    /// Returns the low field as a register index.
    #[inline(always)]
    pub const fn r2_reg(&self) -> RegIdx {
        RegIdx::from_field(self.r2 as u16)
    }

    /// Returns `true` if the opcode field is one of the reserved values.
    #[inline(always)]
    pub const fn is_unknown(&self) -> bool {
        self.opcode.is_none()
    }
}
