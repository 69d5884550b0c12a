//! The employee query collaborator.

use async_trait::async_trait;

use crate::error_handling::QueryError;

use super::models::{EmployeePage, EmployeeQuery};

/// Source of filtered, sorted employee records.
///
/// The export engine only ever calls [`query`](Self::query); how records are
/// stored and joined is up to the implementation.
#[async_trait]
pub trait EmployeeQueryService: Send + Sync {
    /// Returns the requested page of matching employees and the total match count.
    async fn query(&self, query: &EmployeeQuery) -> Result<EmployeePage, QueryError>;
}
