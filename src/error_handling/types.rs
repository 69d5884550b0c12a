//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use std::io;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for database setup.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Errors raised by an employee query service.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The backing database rejected or failed the query.
    #[error("Employee query failed: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored timestamp could not be represented as a UTC date-time.
    #[error("Employee {id} has an invalid {column} value: {value}")]
    InvalidTimestamp {
        /// Employee id of the offending row
        id: i64,
        /// Column holding the timestamp
        column: &'static str,
        /// Raw stored value (milliseconds since epoch)
        value: i64,
    },

    /// The service could not be reached or refused the request.
    #[error("Employee query service unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by an export.
///
/// Every variant bubbles to the caller; none of them is retried.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The employee query service failed. Passed through unchanged.
    #[error(transparent)]
    UpstreamQuery(#[from] QueryError),

    /// A record is missing a required field.
    #[error("Record {index} is missing required field `{field}`")]
    DataIntegrity {
        /// Position of the record in the query result (0-based)
        index: usize,
        /// Name of the missing field
        field: &'static str,
    },

    /// Adding this record's salary overflows the report totals.
    #[error("Salary totals overflow at record {index}")]
    SalaryOverflow {
        /// Position of the record in the query result (0-based)
        index: usize,
    },

    /// The output sink closed or rejected a write.
    #[error("Output sink unavailable: {0}")]
    SinkUnavailable(#[source] io::Error),

    /// The CSV encoder failed.
    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExportError {
    /// Wraps an I/O error coming from the output sink.
    pub(crate) fn sink(err: io::Error) -> Self {
        ExportError::SinkUnavailable(err)
    }
}
