//! Execution units and functional components.
//!
//! This module contains the implementation of the arithmetic logic unit and
//! the flag unit used by the execute stage.

/// Arithmetic Logic Unit and Flag Unit.
pub mod alu;
