//! Sample data for trying out exports.
//!
//! Seeding is idempotent: departments are unique by name and employees by
//! email, so running it twice inserts nothing the second time.

use chrono::Utc;
use log::{debug, info};
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

const SAMPLE_DEPARTMENTS: &[&str] = &[
    "Human Resources",
    "Information Technology",
    "Sales",
    "Marketing",
    "Finance",
    "Operations",
];

// (name, email, annual salary in whole units, department)
const SAMPLE_EMPLOYEES: &[(&str, &str, i64, &str)] = &[
    ("John Doe", "john.doe@company.com", 75_000, "Information Technology"),
    ("Jane Smith", "jane.smith@company.com", 68_000, "Human Resources"),
    ("Mike Johnson", "mike.johnson@company.com", 82_000, "Sales"),
    ("Sarah Wilson", "sarah.wilson@company.com", 71_000, "Marketing"),
    ("David Brown", "david.brown@company.com", 79_000, "Finance"),
    ("Lisa Davis", "lisa.davis@company.com", 73_000, "Operations"),
    ("Robert Miller", "robert.miller@company.com", 85_000, "Information Technology"),
    ("Emily Garcia", "emily.garcia@company.com", 66_000, "Human Resources"),
    ("James Rodriguez", "james.rodriguez@company.com", 88_000, "Sales"),
    ("Amanda Martinez", "amanda.martinez@company.com", 72_000, "Marketing"),
    ("Christopher Lee", "christopher.lee@company.com", 81_000, "Finance"),
    ("Jessica Taylor", "jessica.taylor@company.com", 74_000, "Operations"),
    ("Daniel Anderson", "daniel.anderson@company.com", 92_000, "Information Technology"),
    ("Ashley Thomas", "ashley.thomas@company.com", 69_000, "Human Resources"),
    ("Matthew Jackson", "matthew.jackson@company.com", 86_000, "Sales"),
    ("Stephanie White", "stephanie.white@company.com", 76_000, "Marketing"),
    ("Andrew Harris", "andrew.harris@company.com", 83_000, "Finance"),
    ("Megan Clark", "megan.clark@company.com", 77_000, "Operations"),
];

/// Counts of rows inserted by [`seed_sample_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Departments inserted
    pub departments: u64,
    /// Employees inserted
    pub employees: u64,
}

/// Inserts the sample departments and employees that are not present yet.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<SeedReport, DatabaseError> {
    let now = Utc::now().timestamp_millis();
    let mut report = SeedReport::default();
    let mut tx = pool.begin().await?;

    for name in SAMPLE_DEPARTMENTS {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO departments (name, created_at_ms, updated_at_ms) VALUES (?, ?, ?)",
        )
        .bind(*name)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        report.departments += result.rows_affected();
    }

    for (offset, (name, email, salary, department)) in SAMPLE_EMPLOYEES.iter().enumerate() {
        // Stagger creation times so sorting by created_at is stable and meaningful.
        let created = now + offset as i64;
        let result = sqlx::query(
            "INSERT OR IGNORE INTO employees (
                name, email, salary_cents, department_id, created_at_ms, updated_at_ms
             )
             SELECT ?, ?, ?, d.id, ?, ? FROM departments d WHERE d.name = ?",
        )
        .bind(*name)
        .bind(*email)
        .bind(salary * 100)
        .bind(created)
        .bind(created)
        .bind(*department)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            debug!("Employee already exists: {}", name);
        }
        report.employees += result.rows_affected();
    }

    tx.commit().await?;
    info!(
        "Seeded {} departments and {} employees",
        report.departments, report.employees
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::create_test_pool;

    #[tokio::test]
    async fn test_seed_inserts_sample_rows() {
        let pool = create_test_pool().await;
        let report = seed_sample_data(&pool).await.expect("seed should succeed");
        assert_eq!(report.departments, SAMPLE_DEPARTMENTS.len() as u64);
        assert_eq!(report.employees, SAMPLE_EMPLOYEES.len() as u64);

        let orphaned: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE department_id IS NULL")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(orphaned, 0);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = create_test_pool().await;
        seed_sample_data(&pool).await.expect("first seed");
        let second = seed_sample_data(&pool).await.expect("second seed");
        assert_eq!(second, SeedReport::default());
    }
}
