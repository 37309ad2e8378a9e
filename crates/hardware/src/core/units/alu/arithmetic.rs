//! Arithmetic operations: ADD, SUB, MUL.
//!
//! All results are truncated to 8 bits (two's-complement wrap).

use crate::core::pipeline::signals::AluOp;

/// Executes an 8-bit arithmetic operation.
///
/// Non-arithmetic operations return 0.
pub fn execute(op: AluOp, a: i8, b: i8) -> i8 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        _ => 0,
    }
}
