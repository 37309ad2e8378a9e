//! Program Loader.
//!
//! This module reads program text from disk and assembles it. It performs:
//! 1. **File Reading:** Reports unreadable files as [`LoadError::Io`].
//! 2. **Assembly:** Delegates to [`assemble`], keeping its per-line diagnostics.
//! 3. **Emptiness Check:** A source that yields no instruction is a [`LoadError::Empty`].
//!
//! Placing the words in instruction memory is done by
//! [`Simulator::load`](crate::sim::simulator::Simulator::load).

use std::fs;
use std::path::Path;

use tracing::info;

use crate::common::LoadError;
use crate::sim::assembler::{Program, assemble};

/// Reads and assembles a program file.
///
/// # Arguments
///
/// * `path` - Path to the program text file.
///
/// # Errors
///
/// [`LoadError::Io`] when the file cannot be read, [`LoadError::Empty`] when no
/// line assembles.
pub fn load_program(path: impl AsRef<Path>) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_source(&text, &path.display().to_string())
}

/// Assembles program text already in memory.
///
/// `source_name` labels the text in errors and logs.
///
/// # Errors
///
/// [`LoadError::Empty`] when no line assembles.
pub fn load_source(text: &str, source_name: &str) -> Result<Program, LoadError> {
    let program = assemble(text);
    if program.is_empty() {
        return Err(LoadError::Empty {
            source_name: source_name.to_string(),
        });
    }
    info!(
        instructions = program.len(),
        errors = program.errors.len(),
        warnings = program.warnings.len(),
        "loaded {source_name}"
    );
    Ok(program)
}
