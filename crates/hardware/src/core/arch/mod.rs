//! Architecture-specific components.
//!
//! This module contains architectural state that is not a plain storage array.
//! It includes the following modules:
//! 1. **SREG:** The 5-flag status register and its formatting.

/// Status register definition and flag accessors.
pub mod sreg;

pub use sreg::StatusRegister;
