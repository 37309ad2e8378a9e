//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire architectural state. It coordinates the following:
//! 1. **State Management:** Maintains the register file, program counter, and status register.
//! 2. **Memories:** Owns the separate data and instruction memories.
//! 3. **Statistics:** Tracks cycle and retirement counters.
//!
//! The pipeline is owned next to the `Cpu` by [`Simulator`](crate::sim::simulator::Simulator)
//! and receives `&mut Cpu` for each cycle, so the execute stage is the only writer.

/// Data and instruction memories.
pub mod memory;

use tracing::warn;

use crate::common::{LoadError, RegIdx, RegisterFile};
use crate::config::Config;
use crate::core::arch::StatusRegister;
use crate::stats::SimStats;

pub use memory::{DataMemory, InstructionMemory};

/// Main CPU structure containing all architectural state.
#[derive(Clone, Debug, Default)]
pub struct Cpu {
    /// General-purpose registers R0-R63.
    pub regs: RegisterFile,
    /// Program counter: index of the next word to fetch.
    pub pc: u16,
    /// Status register.
    pub sreg: StatusRegister,
    /// Data memory.
    pub dmem: DataMemory,
    /// Instruction memory.
    pub imem: InstructionMemory,
    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU with zeroed state and the configured initial register values.
    ///
    /// Entries naming a register above R63 are skipped with a warning;
    /// [`Config::validate`] rejects them up front.
    pub fn new(config: &Config) -> Self {
        let mut cpu = Self::default();
        for init in &config.program.initial_registers {
            match RegIdx::new(init.index) {
                Some(idx) => cpu.regs.write(idx, init.value),
                None => warn!(
                    index = init.index,
                    value = init.value,
                    "initial register out of range, skipped"
                ),
            }
        }
        cpu
    }

    /// Loads a program into instruction memory and resets the program counter.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::TooLarge`] if the program exceeds instruction memory.
    pub fn load_program(&mut self, words: &[u16]) -> Result<(), LoadError> {
        self.imem.load(words)?;
        self.pc = 0;
        Ok(())
    }
}
