//! Error definitions.
//!
//! This module defines the error types of the simulator. It provides:
//! 1. **Assembly Diagnostics:** Per-line errors and warnings found while assembling a program; never fatal.
//! 2. **Load Failures:** Fatal problems reading a program into instruction memory.
//! 3. **Configuration Failures:** Problems reading or validating a JSON configuration.
//!
//! Once a program is loaded the pipeline itself cannot fail: unknown opcodes are
//! reported as execution outcomes, not errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reason a single source line could not be assembled.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AsmErrorKind {
    /// The first token is not a known mnemonic.
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),

    /// Fewer operands than the mnemonic requires.
    #[error("{mnemonic} expects {expected}")]
    MissingOperand {
        /// Mnemonic being assembled.
        mnemonic: &'static str,
        /// Human-readable description of the expected operand form.
        expected: &'static str,
    },

    /// An operand that should be a register (`R0`-`R63`) is not.
    #[error("invalid register operand '{0}'")]
    BadRegister(String),

    /// An operand that should be a decimal integer is not.
    #[error("invalid immediate operand '{0}'")]
    BadImmediate(String),
}

/// A diagnostic for one line of program text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct AsmError {
    /// 1-based line number in the source text.
    pub line: usize,
    /// What went wrong.
    pub kind: AsmErrorKind,
}

/// Something suspicious in a line that was still assembled.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AsmWarningKind {
    /// The immediate does not fit the 6-bit field and was truncated.
    #[error("immediate {value} is outside {range} and was truncated to {stored}")]
    ImmediateTruncated {
        /// Value written in the source.
        value: i32,
        /// Representable range of the field.
        range: &'static str,
        /// Value the field actually holds.
        stored: i32,
    },

    /// The line assembles to the end-of-program marker word.
    #[error("assembles to 0x0000, which fetch treats as the end of the program")]
    EndMarker,

    /// Instruction memory is full; this line and all later ones were dropped.
    #[error("instruction memory full ({capacity} words), remaining lines dropped")]
    Overflow {
        /// Instruction memory capacity in words.
        capacity: usize,
    },
}

/// A warning for one line of program text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct AsmWarning {
    /// 1-based line number in the source text.
    pub line: usize,
    /// What was suspicious.
    pub kind: AsmWarningKind,
}

/// Failure to load a program into instruction memory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("cannot open program file '{}': {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The source assembled to zero instructions.
    #[error("no valid instructions found in {source_name}")]
    Empty {
        /// File name or other label of the program source.
        source_name: String,
    },

    /// More words than instruction memory can hold.
    #[error("program has {len} instructions but instruction memory holds {capacity}")]
    TooLarge {
        /// Number of words offered.
        len: usize,
        /// Instruction memory capacity in words.
        capacity: usize,
    },
}

/// Failure to read or validate a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file '{}': {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON for the expected schema.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but holds an impossible value.
    #[error("invalid config: {0}")]
    Invalid(String),
}
