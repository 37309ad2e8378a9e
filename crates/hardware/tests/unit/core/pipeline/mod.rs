//! Pipeline tests.


/// Individual stage behavior.
pub mod stages;

/// End-of-program detection, draining, and cycle counts.
pub mod termination;
