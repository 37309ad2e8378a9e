//! Control Hazard Handling.
//!
//! The pipeline has no data hazards: operands are read in Execute, after every
//! older instruction has retired. The only hazard is control flow. A taken BEQZ
//! or a BR resolves in Execute while two younger instructions may already sit in
//! Decode and Execute. This module provides:
//! 1. **Flush Requests:** A redirect recorded by Execute and consumed exactly once.
//! 2. **Squashing:** Discards the wrong-path instructions when the flush is applied.

use serde::Serialize;

use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};

/// A pending redirect of the program counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FlushRequest {
    /// Address fetching resumes from.
    pub target: u16,
    /// Address of the branch or jump that raised the request.
    pub source_pc: u16,
}

/// Squashes the Decode and Execute slots.
///
/// # Arguments
///
/// * `decode` - The IF/ID slot.
/// * `execute` - The ID/EX slot.
///
/// # Returns
///
/// The number of wrong-path instructions discarded (0 to 2).
pub fn squash(decode: &mut Option<IfIdEntry>, execute: &mut Option<IdExEntry>) -> u64 {
    u64::from(decode.take().is_some()) + u64::from(execute.take().is_some())
}
