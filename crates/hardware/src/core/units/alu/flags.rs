//! Flag Unit.
//!
//! Computes the status register from an operation's 8-bit result and operands.
//! Every call produces a complete new register value; nothing is merged with the
//! previous flags.
//!
//! Two paths exist:
//! - [`update_flags`]: the general path used by ADD, SUB (full Z/N/C/V/S) and by
//!   ANDI, EOR (`FlagOp::Logic`, C and V forced to 0).
//! - [`reduced_flags`]: used by MUL, SAL and SAR, which never consult operands.

use serde::Serialize;

use crate::common::constants::SIGN_BIT;
use crate::core::arch::StatusRegister;

/// Operation class selecting the carry/overflow rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FlagOp {
    /// Addition: carry out of bit 7, same-sign overflow.
    Add,
    /// Subtraction: unsigned borrow, opposite-sign overflow.
    Sub,
    /// Bitwise logic: C and V are always 0.
    Logic,
}

#[inline(always)]
const fn is_negative(v: i8) -> bool {
    (v as u8) & SIGN_BIT != 0
}

/// Computes the full flag set for a result and its pre-operation operands.
///
/// # Examples
///
/// ```
/// use harvsim_core::core::units::alu::flags::{update_flags, FlagOp};
///
/// // 127 + 1 wraps to -128: signed overflow, no carry.
/// let sreg = update_flags(-128, 127, 1, FlagOp::Add);
/// assert!(sreg.negative() && sreg.overflow() && !sreg.carry() && !sreg.zero());
/// ```
pub fn update_flags(result: i8, operand1: i8, operand2: i8, op: FlagOp) -> StatusRegister {
    let mut sreg = StatusRegister::new();

    sreg.set(StatusRegister::Z, result == 0);
    sreg.set(StatusRegister::N, is_negative(result));

    let (a, b) = (operand1 as u8, operand2 as u8);
    let carry = match op {
        FlagOp::Add => u16::from(a) + u16::from(b) > u16::from(u8::MAX),
        FlagOp::Sub => a < b,
        FlagOp::Logic => false,
    };
    sreg.set(StatusRegister::C, carry);

    let (sa, sb, sr) = (
        is_negative(operand1),
        is_negative(operand2),
        is_negative(result),
    );
    let overflow = match op {
        FlagOp::Add => sa == sb && sr != sa,
        FlagOp::Sub => sa != sb && sr == sb,
        FlagOp::Logic => false,
    };
    sreg.set(StatusRegister::V, overflow);

    sreg.set(StatusRegister::S, sreg.negative() ^ sreg.overflow());
    sreg
}

/// Computes the reduced flag set used by MUL and the shifts.
///
/// Only Z and N are derived from the result; S mirrors N and C, V stay clear.
pub fn reduced_flags(result: i8) -> StatusRegister {
    let mut sreg = StatusRegister::new();
    let negative = is_negative(result);
    sreg.set(StatusRegister::Z, result == 0);
    sreg.set(StatusRegister::N, negative);
    sreg.set(StatusRegister::S, negative);
    sreg
}
