//! Employee storage.
//!
//! This module owns the SQLite side of the application:
//! - Connection pool setup and schema migrations
//! - The `EmployeeQueryService` collaborator trait and its SQLite implementation
//! - Sample data seeding

pub mod migrations;
pub mod models;
pub mod pool;
pub mod seed;
pub mod service;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use migrations::{run_migrations, schema_version};
pub use models::{EmployeePage, EmployeeQuery, EmployeeRecord};
pub use pool::{init_db_pool_with_path, DbPool};
pub use seed::{seed_sample_data, SeedReport};
pub use service::EmployeeQueryService;
pub use store::EmployeeStore;
