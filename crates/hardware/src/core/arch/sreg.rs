//! Status Register (SREG).
//!
//! This module implements the 8-bit status register. It performs the following:
//! 1. **Storage:** Holds the Z, S, N, V, C flags in bits 0-4; bits 5-7 are always zero.
//! 2. **Access:** Named accessors for each flag.
//! 3. **Formatting:** Binary-plus-letters rendering for state reports, e.g. `00000110 (SN)`.

use std::fmt;

use serde::Serialize;

use crate::common::constants::{
    SREG_C_BIT, SREG_MASK, SREG_N_BIT, SREG_S_BIT, SREG_V_BIT, SREG_Z_BIT,
};

/// The processor status register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct StatusRegister(u8);

impl StatusRegister {
    /// Zero flag mask.
    pub const Z: u8 = 1 << SREG_Z_BIT;
    /// Sign flag mask (N xor V).
    pub const S: u8 = 1 << SREG_S_BIT;
    /// Negative flag mask.
    pub const N: u8 = 1 << SREG_N_BIT;
    /// Overflow flag mask.
    pub const V: u8 = 1 << SREG_V_BIT;
    /// Carry flag mask.
    pub const C: u8 = 1 << SREG_C_BIT;

    /// Flag letters paired with their masks, in report order.
    const LETTERS: [(u8, char); 5] = [
        (Self::Z, 'Z'),
        (Self::S, 'S'),
        (Self::N, 'N'),
        (Self::V, 'V'),
        (Self::C, 'C'),
    ];

    /// Creates a status register with all flags clear.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Creates a status register from raw bits; bits 5-7 are discarded.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & SREG_MASK)
    }

    /// Returns the raw register value.
    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Sets or clears the flags selected by `mask`.
    #[inline]
    pub const fn set(&mut self, mask: u8, on: bool) {
        if on {
            self.0 |= mask & SREG_MASK;
        } else {
            self.0 &= !mask;
        }
    }

    /// Returns `true` if every flag selected by `mask` is set.
    #[inline(always)]
    pub const fn contains(self, mask: u8) -> bool {
        self.0 & mask == mask
    }

    /// Zero flag.
    pub const fn zero(self) -> bool {
        self.contains(Self::Z)
    }

    /// Sign flag (N xor V).
    pub const fn sign(self) -> bool {
        self.contains(Self::S)
    }

    /// Negative flag.
    pub const fn negative(self) -> bool {
        self.contains(Self::N)
    }

    /// Two's-complement overflow flag.
    pub const fn overflow(self) -> bool {
        self.contains(Self::V)
    }

    /// Carry (ADD) or borrow (SUB) flag.
    pub const fn carry(self) -> bool {
        self.contains(Self::C)
    }

    /// Returns the letters of the set flags, e.g. `"ZS"`.
    pub fn letters(self) -> String {
        Self::LETTERS
            .iter()
            .filter(|(mask, _)| self.contains(*mask))
            .map(|(_, c)| *c)
            .collect()
    }
}

impl fmt::Display for StatusRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08b} ({})", self.0, self.letters())
    }
}
