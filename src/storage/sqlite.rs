//! Student storage backed by a SQLite file.

use crate::domain::model::{Student, StudentUpdate};
use crate::storage::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::Row;
use std::path::Path;
use std::time::Duration;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    age INTEGER NOT NULL
)";

/// SQLite engine. Cloning shares the same pool.
#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Opens (creating if needed) the database file at `path` and ensures the schema exists.
    pub async fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        // create_if_missing only creates the file, not its directory.
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Backend(sqlx::Error::Io(e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: SqlitePool) -> StorageResult<Self> {
        // Idempotent across restarts.
        sqlx::query(CREATE_TABLE_SQL).execute(&pool).await?;
        tracing::debug!("students table ready");
        Ok(Self { pool })
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Like [`SqliteStorage::close`] but gives up after `grace`. Returns `false` if
    /// connections were still checked out when the deadline hit.
    pub async fn close_within(&self, grace: Duration) -> bool {
        tokio::time::timeout(grace, self.pool.close()).await.is_ok()
    }
}

fn row_to_student(row: &SqliteRow) -> Result<Student, sqlx::Error> {
    Ok(Student {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        age: row.try_get("age")?,
    })
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn create_student(&self, name: &str, email: &str, age: i64) -> StorageResult<i64> {
        let result = sqlx::query("INSERT INTO students (name, email, age) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(age)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)
            .inspect_err(|e| tracing::warn!(error = %e, "insert failed"))?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, "student created");
        Ok(id)
    }

    async fn get_students(&self) -> StorageResult<Vec<Student>> {
        let rows = sqlx::query("SELECT id, name, email, age FROM students")
            .fetch_all(&self.pool)
            .await?;

        let mut students = Vec::with_capacity(rows.len());
        for row in &rows {
            students.push(row_to_student(row)?);
        }
        Ok(students)
    }

    async fn get_student_by_id(&self, id: i64) -> StorageResult<Student> {
        let row = sqlx::query("SELECT id, name, email, age FROM students WHERE id = ? LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row_to_student(&row)?),
            None => Err(StorageError::NotFound(id)),
        }
    }

    async fn update_student(&self, update: &StudentUpdate, id: i64) -> StorageResult<Student> {
        let mut student = self.get_student_by_id(id).await?;
        student.apply(update);

        let result = sqlx::query("UPDATE students SET name = ?, email = ?, age = ? WHERE id = ?")
            .bind(&student.name)
            .bind(&student.email)
            .bind(student.age)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)
            .inspect_err(|e| tracing::warn!(id, error = %e, "update failed"))?;

        // The row can disappear between the read and the write.
        if result.rows_affected() == 0 {
            tracing::warn!(id, "student deleted during update");
            return Err(StorageError::NotFound(id));
        }

        tracing::debug!(id, "student updated");
        Ok(student)
    }

    async fn delete_student_by_id(&self, id: i64) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id, affected = result.rows_affected(), "delete executed");
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }

    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
