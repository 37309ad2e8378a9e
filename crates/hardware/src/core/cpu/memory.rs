//! Harvard Memories.
//!
//! This module implements the two separate memories of the machine. It provides:
//! 1. **Data Memory:** 2048 signed 8-bit cells, addressed only through wrapping `DataAddr`s.
//! 2. **Instruction Memory:** 1024 16-bit words, loaded once before simulation and read by fetch.

use crate::common::LoadError;
use crate::common::addr::DataAddr;
use crate::common::constants::{DATA_MEMORY_SIZE, INSTRUCTION_MEMORY_SIZE};

/// Data memory of signed 8-bit cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    cells: Box<[i8; DATA_MEMORY_SIZE]>,
}

impl Default for DataMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl DataMemory {
    /// Creates a zero-filled data memory.
    pub fn new() -> Self {
        Self {
            cells: Box::new([0; DATA_MEMORY_SIZE]),
        }
    }

    /// Reads one cell.
    #[inline(always)]
    pub fn read(&self, addr: DataAddr) -> i8 {
        self.cells[addr.index()]
    }

    /// Writes one cell.
    #[inline(always)]
    pub fn write(&mut self, addr: DataAddr, val: i8) {
        self.cells[addr.index()] = val;
    }

    /// Returns all cells in address order.
    pub fn as_slice(&self) -> &[i8] {
        &self.cells[..]
    }

    /// Iterates over `(address, value)` for every non-zero cell.
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, i8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(|(i, v)| (i, *v))
    }
}

/// Instruction memory of 16-bit words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionMemory {
    words: Box<[u16; INSTRUCTION_MEMORY_SIZE]>,
    len: usize,
}

impl Default for InstructionMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionMemory {
    /// Creates an empty (all-zero) instruction memory.
    pub fn new() -> Self {
        Self {
            words: Box::new([0; INSTRUCTION_MEMORY_SIZE]),
            len: 0,
        }
    }

    /// Replaces the contents with `program`, starting at address 0.
    ///
    /// Words past the end of the program are cleared to the end-of-program marker.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::TooLarge`] if `program` does not fit.
    pub fn load(&mut self, program: &[u16]) -> Result<(), LoadError> {
        if program.len() > INSTRUCTION_MEMORY_SIZE {
            return Err(LoadError::TooLarge {
                len: program.len(),
                capacity: INSTRUCTION_MEMORY_SIZE,
            });
        }
        self.words.fill(0);
        self.words[..program.len()].copy_from_slice(program);
        self.len = program.len();
        Ok(())
    }

    /// Reads the word at `pc`, or `None` if `pc` is past the end of memory.
    #[inline]
    pub fn fetch(&self, pc: u16) -> Option<u16> {
        self.words.get(pc as usize).copied()
    }

    /// Number of words supplied by the last [`load`](Self::load).
    pub const fn program_len(&self) -> usize {
        self.len
    }

    /// Returns all words in address order.
    pub fn as_slice(&self) -> &[u16] {
        &self.words[..]
    }

    /// Iterates over `(address, word)` for every non-zero word.
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, u16)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter(|(_, w)| **w != 0)
            .map(|(i, w)| (i, *w))
    }
}
