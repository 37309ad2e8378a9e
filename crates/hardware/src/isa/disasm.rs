//! Instruction Disassembler.
//!
//! Converts a 16-bit instruction word into the assembler's textual form for
//! trace output, reports, and test diagnostics. Reassembling the output of
//! [`disassemble`] yields the original word for every recognized opcode.
//!
//! # Usage
//!
//! ```
//! use harvsim_core::isa::disasm::disassemble;
//!
//! assert_eq!(disassemble(0x304A), "MOVI R1 10");
//! assert_eq!(disassemble(0x307F), "MOVI R1 -1");
//! assert_eq!(disassemble(0xC041), "UNKNOWN(0xC041)");
//! ```

use crate::isa::decode::{decode, sign_extend_6};
use crate::isa::opcodes::OperandForm;

/// Disassembles an instruction word into a human-readable string.
pub fn disassemble(inst: u16) -> String {
    let d = decode(inst);
    let Some(op) = d.opcode else {
        return format!("UNKNOWN({inst:#06X})");
    };

    let name = op.mnemonic();
    match op.operand_form() {
        OperandForm::RegReg => format!("{name} {} {}", d.r1, d.r2_reg()),
        OperandForm::RegSignedImm => format!("{name} {} {}", d.r1, sign_extend_6(d.r2)),
        OperandForm::RegUnsignedImm => format!("{name} {} {}", d.r1, d.r2),
    }
}
