//! General-Purpose Register File.
//!
//! This module provides the `RegisterFile` struct holding the 64 signed 8-bit
//! registers, and the `RegIdx` index type that addresses them. It provides:
//! 1. **Bounded Indexing:** A `RegIdx` can only hold 0-63, so register accesses never go out of range.
//! 2. **Storage:** Flat storage for R0-R63; every register (including R0) is writable.
//! 3. **Observability:** Read-only slice access and a row-formatted dump for reports.

use std::fmt;

use serde::Serialize;

use super::constants::{FIELD_MASK, REGISTER_COUNT};

/// Index of a general-purpose register (0-63).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RegIdx(u8);

impl RegIdx {
    /// Creates a register index, rejecting values outside 0-63.
    ///
    /// # Examples
    ///
    /// ```
    /// use harvsim_core::common::reg::RegIdx;
    ///
    /// assert_eq!(RegIdx::new(63).map(RegIdx::val), Some(63));
    /// assert_eq!(RegIdx::new(64), None);
    /// ```
    #[inline]
    pub const fn new(idx: u8) -> Option<Self> {
        if (idx as usize) < REGISTER_COUNT {
            Some(Self(idx))
        } else {
            None
        }
    }

    /// Creates a register index from a 6-bit instruction field, discarding higher bits.
    #[inline(always)]
    pub const fn from_field(field: u16) -> Self {
        Self((field & FIELD_MASK) as u8)
    }

    /// Returns the raw register number.
    #[inline(always)]
    pub const fn val(self) -> u8 {
        self.0
    }

    /// Returns the register number as a slice index.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RegIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Register file of 64 signed 8-bit registers, all initialized to zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [i8; REGISTER_COUNT],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a new register file with all registers set to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; REGISTER_COUNT],
        }
    }

    /// Reads a register.
    #[inline(always)]
    pub const fn read(&self, idx: RegIdx) -> i8 {
        self.regs[idx.index()]
    }

    /// Writes a register.
    #[inline(always)]
    pub const fn write(&mut self, idx: RegIdx, val: i8) {
        self.regs[idx.index()] = val;
    }

    /// Returns all register values in index order.
    pub fn as_slice(&self) -> &[i8] {
        &self.regs
    }

    /// Resets every register to zero.
    pub fn clear(&mut self) {
        self.regs = [0; REGISTER_COUNT];
    }
}

impl fmt::Display for RegisterFile {
    /// Formats the registers in rows of eight, e.g. `R0-R7:    0   5  20 100 ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.regs.chunks(8).enumerate() {
            let first = row * 8;
            write!(f, "R{}-R{}:", first, first + 7)?;
            for val in chunk {
                write!(f, " {val:>4}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
