//! Instruction Decoder and Encoder.
//!
//! This module handles the conversion between 16-bit instruction words and the
//! structured `Decoded` format. Decoding is pure and total: every word yields a
//! field triple, with reserved opcodes reported as unknown rather than rejected.

use crate::common::constants::{
    FIELD_MASK, IMM6_EXTEND_BITS, IMM6_SIGN_BIT, OPCODE_MASK, OPCODE_SHIFT, R1_SHIFT,
};
use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::opcodes::Opcode;

/// Decodes an instruction word into its component fields.
///
/// # Examples
///
/// ```
/// use harvsim_core::isa::decode::decode;
/// use harvsim_core::isa::opcodes::Opcode;
///
/// // MOVI R1 10
/// let d = decode(0x304A);
/// assert_eq!(d.opcode, Some(Opcode::Movi));
/// assert_eq!(d.r1.val(), 1);
/// assert_eq!(d.r2, 10);
/// ```
pub fn decode(inst: u16) -> Decoded {
    let opcode_bits = inst.opcode_bits();
    Decoded {
        raw: inst,
        opcode_bits,
        opcode: Opcode::from_bits(opcode_bits),
        r1: inst.r1(),
        r2: inst.r2(),
    }
}

/// Packs an opcode field and two 6-bit fields into an instruction word.
///
/// Each field is masked to its width, so out-of-range inputs are truncated
/// rather than bleeding into neighbouring fields.
pub const fn encode_bits(opcode: u8, r1: u8, r2: u8) -> u16 {
    ((opcode as u16 & OPCODE_MASK) << OPCODE_SHIFT)
        | ((r1 as u16 & FIELD_MASK) << R1_SHIFT)
        | (r2 as u16 & FIELD_MASK)
}

/// Encodes a recognized operation with its register and low-field operands.
///
/// # Examples
///
/// ```
/// use harvsim_core::isa::decode::encode;
/// use harvsim_core::isa::opcodes::Opcode;
///
/// assert_eq!(encode(Opcode::Add, 1, 2), 0x0042);
/// ```
pub const fn encode(opcode: Opcode, r1: u8, r2: u8) -> u16 {
    encode_bits(opcode.bits(), r1, r2)
}

/// Converts a signed immediate to its 6-bit two's-complement field value.
#[inline]
pub const fn imm6_bits(imm: i32) -> u8 {
    (imm & FIELD_MASK as i32) as u8
}

/// Sign-extends a 6-bit immediate field to a signed 8-bit value.
///
/// If bit 5 is set the value is negative and bits 6-7 are filled with ones.
///
/// # Examples
///
/// ```
/// use harvsim_core::isa::decode::sign_extend_6;
///
/// assert_eq!(sign_extend_6(0b01_1111), 31);
/// assert_eq!(sign_extend_6(0b10_0000), -32);
/// assert_eq!(sign_extend_6(0b11_1111), -1);
/// ```
#[inline]
pub const fn sign_extend_6(raw: u8) -> i8 {
    let field = raw & FIELD_MASK as u8;
    if field & IMM6_SIGN_BIT != 0 {
        (field | IMM6_EXTEND_BITS) as i8
    } else {
        field as i8
    }
}
