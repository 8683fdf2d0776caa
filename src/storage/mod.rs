//! Persistence for student records.
//!
//! The HTTP layer only depends on the [`Storage`] trait. [`SqliteStorage`] is the production
//! engine; [`InMemoryStorage`] satisfies the same contract without a database file.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryStorage;
pub use sqlite::SqliteStorage;

use crate::domain::model::{Student, StudentUpdate};
use async_trait::async_trait;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no student found with id {0}")]
    NotFound(i64),

    /// A uniqueness constraint rejected the write (duplicate email).
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("storage backend failure: {0}")]
    Backend(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StorageError::ConstraintViolation(db_err.message().to_string())
            }
            _ => StorageError::Backend(err),
        }
    }
}

/// Capability contract for anything that can hold student records.
///
/// Every call is a single round trip: no caching, batching or retries.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Inserts a row and returns the id assigned to it.
    async fn create_student(&self, name: &str, email: &str, age: i64) -> StorageResult<i64>;

    /// All rows, in whatever order the backend scans them.
    async fn get_students(&self) -> StorageResult<Vec<Student>>;

    async fn get_student_by_id(&self, id: i64) -> StorageResult<Student>;

    /// Read-modify-write: fetches the row, merges `update` into it and writes all columns back.
    ///
    /// Fails with [`StorageError::NotFound`] if the row is missing at either step.
    async fn update_student(&self, update: &StudentUpdate, id: i64) -> StorageResult<Student>;

    async fn delete_student_by_id(&self, id: i64) -> StorageResult<()>;

    /// Liveness check for `/health`.
    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }
}
