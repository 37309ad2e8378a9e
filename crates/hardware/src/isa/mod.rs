//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode table, the 16-bit instruction layout, the decoder and
//! encoder, and the disassembler.
//!
//! # Encoding
//!
//! Every instruction is one 16-bit word: a 4-bit opcode, a 6-bit register
//! field `r1`, and a 6-bit field holding either a second register or an
//! immediate, depending on the opcode.

/// Instruction decoding and encoding logic.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Opcode table and operand forms.
pub mod opcodes;

pub use decode::{decode, encode, sign_extend_6};
pub use instruction::Decoded;
pub use opcodes::Opcode;
