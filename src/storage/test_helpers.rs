//! Shared test helpers for storage and export tests.
//!
//! Provides database setup and test data creation used across unit tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

use crate::storage::run_migrations;

/// Base creation time for test rows: 2024-01-01T00:00:00Z.
pub const BASE_TIMESTAMP_MS: i64 = 1_704_067_200_000;

/// Creates an in-memory database pool with migrations applied.
///
/// Limited to one connection: every new SQLite in-memory connection would
/// otherwise get its own empty database.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Creates a department and returns its id.
pub async fn create_test_department(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query(
        "INSERT INTO departments (name, created_at_ms, updated_at_ms)
         VALUES (?, ?, ?)
         RETURNING id",
    )
    .bind(name)
    .bind(BASE_TIMESTAMP_MS)
    .bind(BASE_TIMESTAMP_MS)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test department")
    .get::<i64, _>(0)
}

/// Creates an employee and returns its id.
///
/// `created_offset_secs` shifts the creation time from [`BASE_TIMESTAMP_MS`]
/// so tests can control ordering by `created_at`.
pub async fn create_test_employee(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    salary_cents: Option<i64>,
    department_id: Option<i64>,
    created_offset_secs: i64,
) -> i64 {
    let created = BASE_TIMESTAMP_MS + created_offset_secs * 1000;
    sqlx::query(
        "INSERT INTO employees (
            name, email, salary_cents, department_id, created_at_ms, updated_at_ms
        ) VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(salary_cents)
    .bind(department_id)
    .bind(created)
    .bind(created)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test employee")
    .get::<i64, _>(0)
}
