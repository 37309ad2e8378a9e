//! Global System Constants.
//!
//! This module defines machine-wide constants used across the simulator. It includes:
//! 1. **Storage Constants:** Sizes of the register file, data memory, and instruction memory.
//! 2. **Instruction Constants:** Field masks and shifts of the 16-bit instruction word.
//! 3. **Status Register Constants:** Bit positions of the Z, S, N, V, C flags.

/// Number of general-purpose registers (R0-R63).
pub const REGISTER_COUNT: usize = 64;

/// Number of signed 8-bit cells in data memory.
pub const DATA_MEMORY_SIZE: usize = 2048;

/// Number of 16-bit words in instruction memory.
pub const INSTRUCTION_MEMORY_SIZE: usize = 1024;

/// Instruction word reserved as the "no instruction" end-of-program marker.
///
/// This is also the encoding of `ADD R0 R0`, which therefore can never execute.
pub const END_OF_PROGRAM_WORD: u16 = 0x0000;

/// Bit position shift for the opcode field (bits 15-12).
pub const OPCODE_SHIFT: u16 = 12;

/// Bit mask for the opcode field after shifting.
pub const OPCODE_MASK: u16 = 0xF;

/// Bit position shift for the first register field (bits 11-6).
pub const R1_SHIFT: u16 = 6;

/// Bit mask for a 6-bit register or immediate field.
pub const FIELD_MASK: u16 = 0x3F;

/// Sign bit of a 6-bit immediate field.
pub const IMM6_SIGN_BIT: u8 = 0x20;

/// Bits OR-ed into a negative 6-bit immediate to sign-extend it to 8 bits.
pub const IMM6_EXTEND_BITS: u8 = 0xC0;

/// Mask applied to a `BR` jump target (10-bit instruction address).
pub const JUMP_TARGET_MASK: u16 = 0x3FF;

/// Sign bit of an 8-bit register value.
pub const SIGN_BIT: u8 = 0x80;

/// Zero flag bit position in the status register.
pub const SREG_Z_BIT: u8 = 0;

/// Sign flag (N xor V) bit position in the status register.
pub const SREG_S_BIT: u8 = 1;

/// Negative flag bit position in the status register.
pub const SREG_N_BIT: u8 = 2;

/// Two's-complement overflow flag bit position in the status register.
pub const SREG_V_BIT: u8 = 3;

/// Carry/borrow flag bit position in the status register.
pub const SREG_C_BIT: u8 = 4;

/// Mask of the meaningful status register bits; the top 3 bits are always zero.
pub const SREG_MASK: u8 = 0b0001_1111;
