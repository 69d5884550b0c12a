//! Configuration types shared by the CLI and library callers.

use std::path::PathBuf;

use clap::ValueEnum;
use log::LevelFilter;

use crate::config::constants::DB_PATH;
use crate::export::{ExportFormat, ExportRequest, SortField, SortOrder};

/// Verbosity of the export log, `Error` being the quietest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Failures only
    Error,
    /// Failures and truncated or degraded exports
    Warn,
    /// Export start and completion
    Info,
    /// Query parameters and page breaks
    Debug,
    /// Everything, including sqlx internals allowed by `RUST_LOG`
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Shape of each log line written to stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// `target [LEVEL] message`, level coloured
    Plain,
    /// One JSON object per line: `ts`, `level`, `target`, `msg`
    Json,
}

/// Settings for one export run, independent of how they were collected.
///
/// ```no_run
/// use employee_reports::Config;
/// use employee_reports::export::ExportFormat;
///
/// let request = Config {
///     format: ExportFormat::Pdf,
///     department_id: Some(2),
///     ..Default::default()
/// }
/// .export_request();
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file holding departments and employees
    pub db_path: PathBuf,
    /// Log verbosity
    pub log_level: LogLevel,
    /// Log line shape
    pub log_format: LogFormat,
    /// File or directory to write to; stdout when `None`
    pub output: Option<PathBuf>,
    /// CSV or PDF
    pub format: ExportFormat,
    /// Only export employees of this department
    pub department_id: Option<i64>,
    /// Append `Created At` / `Updated At` (CSV only)
    pub include_timestamps: bool,
    /// Sort column
    pub sort_by: SortField,
    /// Sort direction
    pub order: SortOrder,
}

impl Config {
    /// The export request these settings describe.
    pub fn export_request(&self) -> ExportRequest {
        ExportRequest::new(self.format.clone())
            .with_department(self.department_id)
            .with_timestamps(self.include_timestamps)
            .sorted_by(self.sort_by, self.order)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DB_PATH),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            output: None,
            format: ExportFormat::Csv,
            department_id: None,
            include_timestamps: false,
            sort_by: SortField::Name,
            order: SortOrder::Asc,
        }
    }
}
