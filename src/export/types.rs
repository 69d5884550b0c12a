//! Export types and options.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::config::{CSV_CONTENT_TYPE, EXPORT_FILENAME_PREFIX, PDF_CONTENT_TYPE};

/// Export format options.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    /// Delimited text (RFC 4180 CSV), streamed row by row
    Csv,
    /// Fixed-layout paginated document with a statistics page
    Pdf,
}

impl ExportFormat {
    /// File extension used in suggested filenames.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// MIME type announced before the body is streamed.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_CONTENT_TYPE,
            ExportFormat::Pdf => PDF_CONTENT_TYPE,
        }
    }
}

/// Column the employee query is ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum SortField {
    /// Employee name
    #[strum(serialize = "name")]
    Name,
    /// Employee email
    #[strum(serialize = "email")]
    Email,
    /// Salary amount
    #[strum(serialize = "salary")]
    Salary,
    /// Creation timestamp
    #[value(name = "created_at", alias = "createdAt")]
    #[strum(to_string = "created_at", serialize = "createdAt")]
    CreatedAt,
}

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum SortOrder {
    /// Ascending
    #[value(name = "ASC", alias = "asc")]
    #[strum(serialize = "ASC")]
    Asc,
    /// Descending
    #[value(name = "DESC", alias = "desc")]
    #[strum(serialize = "DESC")]
    Desc,
}

/// A single export invocation. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRequest {
    format: ExportFormat,
    department_id: Option<i64>,
    include_timestamps: bool,
    sort_field: SortField,
    sort_order: SortOrder,
}

impl ExportRequest {
    /// Creates a request for `format`, sorted by name ascending, without timestamps.
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            department_id: None,
            include_timestamps: false,
            sort_field: SortField::Name,
            sort_order: SortOrder::Asc,
        }
    }

    /// Restricts the export to one department.
    pub fn with_department(mut self, department_id: Option<i64>) -> Self {
        self.department_id = department_id;
        self
    }

    /// Adds the created/updated timestamp columns.
    pub fn with_timestamps(mut self, include: bool) -> Self {
        self.include_timestamps = include;
        self
    }

    /// Sets the sort column and direction.
    pub fn sorted_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_field = field;
        self.sort_order = order;
        self
    }

    /// Requested format.
    pub fn format(&self) -> &ExportFormat {
        &self.format
    }

    /// Department filter, if any.
    pub fn department_id(&self) -> Option<i64> {
        self.department_id
    }

    /// Whether timestamp columns are included.
    pub fn include_timestamps(&self) -> bool {
        self.include_timestamps
    }

    /// Sort column.
    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    /// Sort direction.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }
}

/// Response metadata announced before any body byte is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportHeader {
    /// MIME type of the body
    pub content_type: &'static str,
    /// Suggested download filename
    pub filename: String,
}

impl ExportHeader {
    /// Builds the header for `format`, using `now` for the unique filename token.
    pub fn for_format(format: &ExportFormat, now: DateTime<Utc>) -> Self {
        Self {
            content_type: format.content_type(),
            filename: format!(
                "{}_{}.{}",
                EXPORT_FILENAME_PREFIX,
                now.timestamp_millis(),
                format.extension()
            ),
        }
    }
}

/// Outcome of a completed export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    /// Format that was written
    pub format: ExportFormat,
    /// Number of employee records exported
    pub records: usize,
    /// Number of body bytes accepted by the sink
    pub bytes_written: u64,
    /// Page count (paginated format only)
    pub pages: Option<usize>,
}
