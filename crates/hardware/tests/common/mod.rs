//! Shared test infrastructure.
