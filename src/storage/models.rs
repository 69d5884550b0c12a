//! Employee query data structures.

use chrono::{DateTime, Utc};

use crate::export::{Money, SortField, SortOrder};

/// An employee row joined with its department name.
///
/// Read-only from the point of view of the export engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRecord {
    /// Primary key
    pub id: i64,
    /// Full name
    pub name: String,
    /// Unique email address
    pub email: String,
    /// Salary; `None` only when the stored value is missing
    pub salary: Option<Money>,
    /// Resolved department name; `None` when the department is unknown
    pub department_name: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Filter, sort and pagination parameters for an employee query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeQuery {
    /// 1-based page number
    pub page: u32,
    /// Rows per page
    pub page_size: u32,
    /// Only employees of this department
    pub department_id: Option<i64>,
    /// Case-insensitive substring match on name or email
    pub search: Option<String>,
    /// Sort column
    pub sort_field: SortField,
    /// Sort direction
    pub sort_order: SortOrder,
}

impl Default for EmployeeQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            department_id: None,
            search: None,
            sort_field: SortField::CreatedAt,
            sort_order: SortOrder::Desc,
        }
    }
}

impl EmployeeQuery {
    /// Number of rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.page_size)
    }
}

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePage {
    /// Records on this page, in query order
    pub records: Vec<EmployeeRecord>,
    /// Total number of matching records across all pages
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_match_listing_defaults() {
        let query = EmployeeQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.sort_field, SortField::CreatedAt);
        assert_eq!(query.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_offset() {
        let query = EmployeeQuery {
            page: 3,
            page_size: 25,
            ..Default::default()
        };
        assert_eq!(query.offset(), 50);

        let first = EmployeeQuery {
            page: 0,
            ..Default::default()
        };
        assert_eq!(first.offset(), 0);
    }
}
