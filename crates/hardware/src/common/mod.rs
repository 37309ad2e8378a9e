//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Address Types:** A wrapping data memory address.
//! 2. **Constants:** Machine-wide sizes, instruction field layout, and flag bit positions.
//! 3. **Error Handling:** Assembly diagnostics, load failures, and configuration failures.
//! 4. **Register Management:** Bounded register indices and the register file.

/// Data memory address type.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use addr::DataAddr;
pub use error::{AsmError, AsmErrorKind, AsmWarning, AsmWarningKind, ConfigError, LoadError};
pub use reg::{RegIdx, RegisterFile};
