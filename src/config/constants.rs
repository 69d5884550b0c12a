//! Configuration constants.
//!
//! This module defines the constants used throughout the export engine,
//! including query sizing, output naming and the PDF page geometry.

/// Default SQLite database path.
pub const DB_PATH: &str = "./employees.db";

/// Environment variable consulted for the database path when `--db-path` is absent.
pub const DB_PATH_ENV: &str = "EMPLOYEE_REPORTS_DB_PATH";

// Query sizing
/// Page size requested from the employee query service during an export.
/// Large enough to fetch every matching row in a single call.
pub const EXPORT_PAGE_SIZE: u32 = 10_000;

/// Number of CSV rows encoded before the buffer is handed to the sink.
/// Each chunk is awaited before the next one is encoded.
pub const CSV_CHUNK_ROWS: usize = 256;

// Output naming
/// Prefix for suggested export filenames (`employees_export_<millis>.<ext>`).
pub const EXPORT_FILENAME_PREFIX: &str = "employees_export";
/// Content type of delimited exports.
pub const CSV_CONTENT_TYPE: &str = "text/csv";
/// Content type of paginated exports.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Display value used when an employee has no resolvable department.
pub const MISSING_DEPARTMENT: &str = "N/A";
/// Department shown in the PDF header when a filtered export matched nothing.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

// PDF page geometry (points, 72 per inch)
/// US Letter page width.
pub const PAGE_WIDTH: f64 = 612.0;
/// US Letter page height.
pub const PAGE_HEIGHT: f64 = 792.0;
/// Margin applied on all four sides.
pub const PAGE_MARGIN: f64 = 50.0;
/// Height of every table band (header or data row).
pub const BAND_HEIGHT: f64 = 25.0;
/// Fixed table column widths: id, name, email, department, salary.
pub const TABLE_COLUMN_WIDTHS: [f64; 5] = [50.0, 120.0, 150.0, 100.0, 80.0];
/// Horizontal padding inside a table cell.
pub const CELL_PADDING: f64 = 5.0;

// PDF fill colours (RGB, 0.0-1.0)
/// Table header band (#f0f0f0).
pub const HEADER_FILL: (f64, f64, f64) = (0.941, 0.941, 0.941);
/// Even data rows (#ffffff).
pub const EVEN_ROW_FILL: (f64, f64, f64) = (1.0, 1.0, 1.0);
/// Odd data rows (#f9f9f9).
pub const ODD_ROW_FILL: (f64, f64, f64) = (0.976, 0.976, 0.976);
