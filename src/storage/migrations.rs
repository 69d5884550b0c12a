//! Schema migrations for the employee store.
//!
//! Migration files in `migrations/` at the crate root are embedded into the
//! binary at compile time and applied in version order.

use anyhow::Context;
use log::info;
use sqlx::migrate::Migrator;
use sqlx::{Pool, Sqlite};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies all pending migrations and returns the resulting schema version.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<i64, anyhow::Error> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to apply migrations")?;

    let version = schema_version(pool).await?;
    info!("Employee schema at version {}", version);
    Ok(version)
}

/// Highest successfully applied migration version, or 0 on an empty database.
pub async fn schema_version(pool: &Pool<Sqlite>) -> Result<i64, anyhow::Error> {
    let tracked: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;
    if tracked == 0 {
        return Ok(0);
    }

    let version: Option<i64> =
        sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;
    Ok(version.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::create_test_pool;
    use sqlx::sqlite::SqlitePoolOptions;

    #[test]
    fn test_migrations_are_embedded_in_order() {
        let versions: Vec<i64> = MIGRATOR.iter().map(|m| m.version).collect();
        assert_eq!(versions, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_schema_version_on_empty_database() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        assert_eq!(schema_version(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_migrations_create_tables() {
        let pool = create_test_pool().await;
        assert!(schema_version(&pool).await.unwrap() >= 2);

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('departments', 'employees') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .expect("Failed to list tables");
        assert_eq!(tables, vec!["departments", "employees"]);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = create_test_pool().await;
        let again = run_migrations(&pool).await.expect("second run");
        assert!(again >= 2);
    }
}
