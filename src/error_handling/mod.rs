//! Error handling.
//!
//! Errors are grouped by the layer that raises them:
//! - **Initialization**: logger setup
//! - **Database**: pool creation and SQL failures during setup
//! - **Query**: failures of the employee query service
//! - **Export**: upstream, data-integrity, sink and encoding failures

mod types;

// Re-export public API
pub use types::{DatabaseError, ExportError, InitializationError, QueryError};
