// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::Path;
use std::sync::Arc;

use sqlx::{Row, SqlitePool};
use tempfile::TempDir;

use employee_reports::storage::{init_db_pool_with_path, run_migrations, DbPool, EmployeeStore};

/// Base creation time for test rows: 2024-01-01T00:00:00Z.
#[allow(dead_code)] // Used by other test files
pub const BASE_TIMESTAMP_MS: i64 = 1_704_067_200_000;

/// Department names used by the sample fixtures, in insertion order.
#[allow(dead_code)] // Used by other test files
pub const DEPARTMENTS: [&str; 6] = [
    "Human Resources",
    "Information Technology",
    "Sales",
    "Marketing",
    "Finance",
    "Operations",
];

/// Creates a migrated database file inside `dir`.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool_in(dir: &TempDir) -> DbPool {
    create_test_pool_with_path(&dir.path().join("employees.db")).await
}

/// Creates (or reopens) a migrated database at `db_path`.
pub async fn create_test_pool_with_path(db_path: &Path) -> DbPool {
    let pool = init_db_pool_with_path(db_path)
        .await
        .expect("Failed to create test database");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Creates a department and returns its id.
#[allow(dead_code)] // Used by other test files
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
#[allow(dead_code)] // Used by other test files
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

/// Inserts the six departments and `count` employees spread across them
/// round-robin. Returns the department ids in [`DEPARTMENTS`] order.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_workforce(pool: &SqlitePool, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(DEPARTMENTS.len());
    for name in DEPARTMENTS {
        ids.push(create_test_department(pool, name).await);
    }
    for i in 0..count {
        create_test_employee(
            pool,
            &format!("Employee {:03}", i + 1),
            &format!("employee{:03}@company.com", i + 1),
            Some(5_000_000 + i as i64 * 10_000),
            Some(ids[i % ids.len()]),
            i as i64,
        )
        .await;
    }
    ids
}

/// Query service over `pool`.
#[allow(dead_code)] // Used by other test files
pub fn store(pool: &DbPool) -> EmployeeStore {
    EmployeeStore::new(Arc::clone(pool))
}
