//! Database connection pool management.
//!
//! This module initializes and configures the SQLite connection pool with:
//! - WAL mode enabled for concurrent readers
//! - Automatic database file creation

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use log::{debug, error};
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::error_handling::DatabaseError;

/// Shared handle to the SQLite pool.
pub type DbPool = Arc<Pool<Sqlite>>;

/// Initializes and returns a database connection pool for `db_path`.
///
/// Creates the database file if it doesn't exist and enables WAL mode.
/// Foreign keys are enforced by sqlx's SQLite defaults.
pub async fn init_db_pool_with_path(db_path: &Path) -> Result<DbPool, DatabaseError> {
    let db_path_str = db_path.to_string_lossy().to_string();
    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(&db_path_str)
    {
        Ok(_) => debug!("Database file created: {}", db_path_str),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("Database file already exists: {}", db_path_str)
        }
        Err(e) => {
            error!("Failed to create database file: {e}");
            return Err(DatabaseError::FileCreationError(e.to_string()));
        }
    }

    let pool = SqlitePool::connect(&format!("sqlite:{}", db_path_str))
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })?;

    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await
        .map_err(|e| {
            error!("Failed to set WAL mode: {e}");
            DatabaseError::SqlError(e)
        })?;

    Ok(Arc::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("fresh.db");
        assert!(!path.exists());

        let pool = init_db_pool_with_path(&path)
            .await
            .expect("Pool should initialize");
        assert!(path.exists());

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(pool.as_ref())
            .await
            .expect("Failed to read journal mode");
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_init_reuses_existing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("existing.db");
        init_db_pool_with_path(&path).await.expect("first open");
        init_db_pool_with_path(&path).await.expect("second open");
    }

    #[tokio::test]
    async fn test_init_fails_for_missing_directory() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("no_such_dir").join("db.sqlite");
        let result = init_db_pool_with_path(&path).await;
        assert!(matches!(result, Err(DatabaseError::FileCreationError(_))));
    }
}
