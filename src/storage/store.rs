//! SQLite-backed employee query service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use log::debug;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::error_handling::QueryError;
use crate::export::{Money, SortField, SortOrder};

use super::models::{EmployeePage, EmployeeQuery, EmployeeRecord};
use super::pool::DbPool;
use super::service::EmployeeQueryService;

/// Employee query service reading the `employees` and `departments` tables.
#[derive(Clone, Debug)]
pub struct EmployeeStore {
    pool: DbPool,
}

impl EmployeeStore {
    /// Wraps an initialized (and migrated) pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Maps a sort field to its column. Only these fixed strings ever reach ORDER BY.
fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Name => "e.name",
        SortField::Email => "e.email",
        SortField::Salary => "e.salary_cents",
        SortField::CreatedAt => "e.created_at_ms",
    }
}

fn sort_direction(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

/// Appends the WHERE clause for the query's filters.
fn build_where_clause(query_builder: &mut QueryBuilder<'_, Sqlite>, query: &EmployeeQuery) {
    let mut has_where = false;
    if let Some(department_id) = query.department_id {
        query_builder.push(" WHERE e.department_id = ");
        query_builder.push_bind(department_id);
        has_where = true;
    }
    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        if has_where {
            query_builder.push(" AND ");
        } else {
            query_builder.push(" WHERE ");
        }
        let pattern = format!("%{}%", search.trim().to_lowercase());
        query_builder.push("(LOWER(e.name) LIKE ");
        query_builder.push_bind(pattern.clone());
        query_builder.push(" OR LOWER(e.email) LIKE ");
        query_builder.push_bind(pattern);
        query_builder.push(")");
    }
}

fn to_utc(id: i64, column: &'static str, value: i64) -> Result<DateTime<Utc>, QueryError> {
    DateTime::from_timestamp_millis(value).ok_or(QueryError::InvalidTimestamp { id, column, value })
}

fn decode_row(row: &SqliteRow) -> Result<EmployeeRecord, QueryError> {
    let id: i64 = row.try_get("id")?;
    let salary_cents: Option<i64> = row.try_get("salary_cents")?;
    let created_at_ms: i64 = row.try_get("created_at_ms")?;
    let updated_at_ms: i64 = row.try_get("updated_at_ms")?;

    Ok(EmployeeRecord {
        id,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        salary: salary_cents.map(Money::from_cents),
        department_name: row.try_get("department_name")?,
        created_at: to_utc(id, "created_at_ms", created_at_ms)?,
        updated_at: to_utc(id, "updated_at_ms", updated_at_ms)?,
    })
}

#[async_trait]
impl EmployeeQueryService for EmployeeStore {
    async fn query(&self, query: &EmployeeQuery) -> Result<EmployeePage, QueryError> {
        debug!(
            "Querying employees: page={} size={} department={:?} sort={} {}",
            query.page, query.page_size, query.department_id, query.sort_field, query.sort_order
        );

        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM employees e");
        build_where_clause(&mut count_builder, query);
        let total: i64 = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.as_ref())
            .await?;

        let mut query_builder = QueryBuilder::new(
            "SELECT e.id, e.name, e.email, e.salary_cents, d.name AS department_name,
                    e.created_at_ms, e.updated_at_ms
             FROM employees e
             LEFT JOIN departments d ON d.id = e.department_id",
        );
        build_where_clause(&mut query_builder, query);
        query_builder.push(format!(
            " ORDER BY {} {}, e.id ASC LIMIT ",
            sort_column(query.sort_field),
            sort_direction(query.sort_order)
        ));
        query_builder.push_bind(i64::from(query.page_size));
        query_builder.push(" OFFSET ");
        query_builder.push_bind(query.offset() as i64);

        let mut rows = query_builder.build().fetch(self.pool.as_ref());
        let mut records = Vec::new();
        while let Some(row) = rows.try_next().await? {
            records.push(decode_row(&row)?);
        }

        Ok(EmployeePage {
            records,
            total: total.max(0) as u64,
        })
    }
}
