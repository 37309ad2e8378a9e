//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the 8-bit integer ALU used in the Execute stage, and the
//! Flag Unit that turns its results into status register values.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul
//! - [`logic`]:      And, Xor, Pass
//! - [`shifts`]:     Sal, Sar
//! - [`flags`]:      Z/S/N/V/C computation

/// Integer arithmetic operations (add, subtract, multiply).
pub mod arithmetic;

/// Status register computation.
pub mod flags;

/// Bitwise logical operations (and, xor) and immediate pass-through.
pub mod logic;

/// Shift operations (sal, sar).
pub mod shifts;

use crate::core::pipeline::signals::AluOp;

/// Arithmetic Logic Unit for 8-bit register operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation on two 8-bit operands.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand (the current value of `r1`)
    /// * `b`  - Second operand (register value, immediate, or shift count)
    ///
    /// # Returns
    ///
    /// The result truncated to 8 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use harvsim_core::core::units::alu::Alu;
    /// use harvsim_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 127, 1), -128);
    /// assert_eq!(Alu::execute(AluOp::Sub, 0, 1), -1);
    /// assert_eq!(Alu::execute(AluOp::Sar, -64, 3), -8);
    /// ```
    pub fn execute(op: AluOp, a: i8, b: i8) -> i8 {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul => arithmetic::execute(op, a, b),
            AluOp::And | AluOp::Xor | AluOp::Pass => logic::execute(op, a, b),
            AluOp::Sal | AluOp::Sar => shifts::execute(op, a, b),
        }
    }
}
