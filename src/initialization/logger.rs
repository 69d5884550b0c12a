//! Logger setup for the export CLI and library callers.
//!
//! Everything goes to stderr: stdout may be carrying a CSV or PDF body.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};
use serde_json::json;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

fn coloured_level(level: Level) -> ColoredString {
    let label = level.to_string();
    match level {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}

fn write_plain(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    writeln!(
        buf,
        "{} [{}] {}",
        record.target().cyan(),
        coloured_level(record.level()),
        record.args()
    )
}

fn json_line(record: &Record) -> serde_json::Value {
    json!({
        "ts": chrono::Utc::now().timestamp_millis(),
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    })
}

fn write_json(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    writeln!(buf, "{}", json_line(record))
}

/// Installs the global logger.
///
/// `RUST_LOG` is read first; `level` then overrides it for this crate and as
/// the default. sqlx is held at `Warn` so query logging does not drown out
/// export progress.
///
/// ```bash
/// RUST_LOG=employee_reports=debug employee_reports export --format pdf
/// ```
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder
        .filter_level(level)
        .filter_module("sqlx", LevelFilter::Warn)
        .filter_module("employee_reports", level)
        .target(env_logger::Target::Stderr);

    match format {
        LogFormat::Plain => builder.format(write_plain),
        LogFormat::Json => builder.format(write_json),
    };

    builder.try_init()?;
    Ok(())
}
