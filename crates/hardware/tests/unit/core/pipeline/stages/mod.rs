//! Stage tests.


/// Execute stage and retirement.
pub mod execute;
