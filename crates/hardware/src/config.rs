//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** The program file name and the seeded registers (R1=5, R2=20, R3=100).
//! 2. **Structures:** Hierarchical config for general run options and the program.
//! 3. **Loading:** JSON parsing from a string or a file, with validation.
//!
//! Every field has a default, so `{}` is a complete configuration. Use
//! `Config::default()` when no file is given.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;
use crate::common::constants::REGISTER_COUNT;

/// Default configuration constants for the simulator.
mod defaults {
    /// Program file read when none is given.
    pub const PROGRAM_PATH: &str = "Test_Instructions.txt";

    /// Registers seeded before the first cycle, as `(index, value)`.
    pub const INITIAL_REGISTERS: &[(u8, i8)] = &[(1, 5), (2, 20), (3, 100)];
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use harvsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace": true, "max_cycles": 500 },
///     "program": {
///         "path": "loop.txt",
///         "initial_registers": [ { "index": 4, "value": -7 } ]
///     }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert!(config.general.trace);
/// assert_eq!(config.general.max_cycles, Some(500));
/// assert_eq!(config.program.initial_registers.len(), 1);
/// assert_eq!(config.program.initial_registers[0].value, -7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// General run options.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Program source and initial machine state.
    #[serde(default)]
    pub program: ProgramConfig,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, [`ConfigError::Invalid`] for
    /// a register index outside R0-R63.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks values that the type system cannot rule out.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first bad register index.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(bad) = self
            .program
            .initial_registers
            .iter()
            .find(|r| usize::from(r.index) >= REGISTER_COUNT)
        {
            return Err(ConfigError::Invalid(format!(
                "register index {} is out of range (R0-R{})",
                bad.index,
                REGISTER_COUNT - 1
            )));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Print a per-cycle pipeline trace.
    #[serde(default)]
    pub trace: bool,

    /// Stop after this many cycles even if the program has not halted.
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Program source and initial register values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// Path of the program text file.
    #[serde(default = "ProgramConfig::default_path")]
    pub path: PathBuf,

    /// Registers written before the first cycle. Later entries win.
    #[serde(default = "ProgramConfig::default_initial_registers")]
    pub initial_registers: Vec<RegisterInit>,
}

impl ProgramConfig {
    /// Returns the default program path.
    fn default_path() -> PathBuf {
        PathBuf::from(defaults::PROGRAM_PATH)
    }

    /// Returns the default seeded registers.
    fn default_initial_registers() -> Vec<RegisterInit> {
        defaults::INITIAL_REGISTERS
            .iter()
            .map(|&(index, value)| RegisterInit { index, value })
            .collect()
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            initial_registers: Self::default_initial_registers(),
        }
    }
}

/// One seeded register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterInit {
    /// Register number, 0-63.
    pub index: u8,
    /// Initial signed 8-bit value.
    pub value: i8,
}
