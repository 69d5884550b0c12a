//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (query sizing, page geometry, colours)
//! - Logging option types
//! - The library-level `Config` used to build export requests

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
