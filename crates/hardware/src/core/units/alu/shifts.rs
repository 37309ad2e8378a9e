//! Shift operations: SAL, SAR.
//!
//! The shift count is the raw unsigned 6-bit field (0-63), so counts at or above
//! the register width are legal and saturate instead of wrapping the count.

use crate::core::pipeline::signals::AluOp;

/// Register width in bits.
const WIDTH: u32 = i8::BITS;

/// Executes an 8-bit shift. `count` is taken from `b` as an unsigned value.
///
/// Non-shift operations return 0.
pub fn execute(op: AluOp, a: i8, b: i8) -> i8 {
    let count = u32::from(b as u8);
    match op {
        AluOp::Sal => a.checked_shl(count).unwrap_or(0),
        // Arithmetic shift by WIDTH-1 already leaves only copies of the sign bit.
        AluOp::Sar => a >> count.min(WIDTH - 1),
        _ => 0,
    }
}
