//! In-process [`Storage`] used by tests and local experiments.

use crate::domain::model::{Student, StudentUpdate};
use crate::storage::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

const EMAIL_CONSTRAINT: &str = "UNIQUE constraint failed: students.email";

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Student>,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|s| s.email == email && Some(s.id) != except)
    }

    /// Highest live id plus one, the rowid rule for `INTEGER PRIMARY KEY`.
    fn next_id(&self) -> i64 {
        self.rows.keys().next_back().map_or(1, |id| id + 1)
    }
}

/// Map-backed storage. Ids follow the SQLite rowid rule, so the highest id is reused
/// once its row is deleted.
#[derive(Default)]
pub struct InMemoryStorage {
    table: RwLock<Table>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_student(&self, name: &str, email: &str, age: i64) -> StorageResult<i64> {
        let mut table = self.table.write().await;
        if table.email_taken(email, None) {
            return Err(StorageError::ConstraintViolation(EMAIL_CONSTRAINT.to_string()));
        }

        let id = table.next_id();
        table.rows.insert(
            id,
            Student {
                id,
                name: name.to_string(),
                email: email.to_string(),
                age,
            },
        );
        Ok(id)
    }

    async fn get_students(&self) -> StorageResult<Vec<Student>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_student_by_id(&self, id: i64) -> StorageResult<Student> {
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(StorageError::NotFound(id))
    }

    async fn update_student(&self, update: &StudentUpdate, id: i64) -> StorageResult<Student> {
        let mut table = self.table.write().await;
        let mut student = table
            .rows
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))?;
        student.apply(update);

        if table.email_taken(&student.email, Some(id)) {
            return Err(StorageError::ConstraintViolation(EMAIL_CONSTRAINT.to_string()));
        }

        table.rows.insert(id, student.clone());
        Ok(student)
    }

    async fn delete_student_by_id(&self, id: i64) -> StorageResult<()> {
        let mut table = self.table.write().await;
        match table.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(id)),
        }
    }
}
