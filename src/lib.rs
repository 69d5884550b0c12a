//! employee_reports library: employee report export engine
//!
//! Exports a filtered, sorted set of employee records either as a streamed CSV
//! file or as a paginated PDF report (banded table across pages, a statistics
//! page and `Page i of N` footers).
//!
//! Records come from any [`EmployeeQueryService`]; [`storage::EmployeeStore`]
//! is the bundled SQLite implementation.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use employee_reports::export::{export, BufferedResponse, ExportFormat, ExportRequest};
//! use employee_reports::storage::{init_db_pool_with_path, run_migrations, EmployeeStore};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = init_db_pool_with_path(Path::new("employees.db")).await?;
//! run_migrations(&pool).await?;
//! let store = EmployeeStore::new(Arc::clone(&pool));
//!
//! let mut response = BufferedResponse::default();
//! let summary = export(
//!     &store,
//!     ExportRequest::new(ExportFormat::Pdf).with_department(Some(2)),
//!     &mut response,
//! )
//! .await?;
//! println!("{} pages", summary.pages.unwrap_or(0));
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

pub mod config;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod storage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{DatabaseError, ExportError, InitializationError, QueryError};
pub use export::{
    export, prepare_export, ExportFormat, ExportHeader, ExportRequest, ExportSink, ExportSummary,
    SortField, SortOrder,
};
pub use storage::{EmployeeQueryService, EmployeeRecord, EmployeeStore};
