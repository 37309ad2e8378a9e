//! Bitwise logical operations: AND (ANDI), XOR (EOR), and pass-through (MOVI).

use crate::core::pipeline::signals::AluOp;

/// Executes an 8-bit logical operation.
///
/// `Pass` returns `b` unchanged; it carries MOVI's immediate to the register file.
/// Non-logical operations return 0.
pub fn execute(op: AluOp, a: i8, b: i8) -> i8 {
    match op {
        AluOp::And => a & b,
        AluOp::Xor => a ^ b,
        AluOp::Pass => b,
        _ => 0,
    }
}
