//! Employee report export engine.
//!
//! Turns a filtered, sorted set of employee records into either a streamed
//! CSV file or a paginated PDF report with a statistics page.
//!
//! The pieces, leaf first:
//! - [`projector`]: flattens records into display rows
//! - [`csv`]: delimited writer
//! - [`pdf`]: paginated writer (layout, statistics, rendering)
//! - [`coordinator`]: queries the employee service and dispatches on format

pub mod coordinator;
pub mod csv;
mod money;
pub mod pdf;
pub mod projector;
mod staging;
mod types;

pub use coordinator::{export, prepare_export, BufferedResponse, ExportSink, PreparedExport};
pub use money::Money;
pub use projector::{project, Column, ProjectedRow};
pub use staging::{resolve_destination, StagedFile};
pub use types::{ExportFormat, ExportHeader, ExportRequest, ExportSummary, SortField, SortOrder};
