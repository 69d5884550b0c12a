//! Application initialization.
//!
//! Sets up process-wide resources before a command runs. Currently this is
//! the logger; database pools are created per command in `storage`.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
