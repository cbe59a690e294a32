//! Shared utilities: constants, error types, logging setup, and time formatting.

pub mod constants;
pub mod error;
pub mod logging;
pub mod time;
