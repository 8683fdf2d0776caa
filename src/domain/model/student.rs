use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted student record. All four fields are always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    /// Assigned by storage on creation, never changes afterwards.
    pub id: i64,
    pub name: String,
    /// Unique across all students.
    pub email: String,
    pub age: i64,
}

impl Student {
    /// Overwrites the fields present in `update` and keeps the rest.
    ///
    /// Storage calls this between reading the current row and writing the full row back.
    pub fn apply(&mut self, update: &StudentUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(age) = update.age {
            self.age = age;
        }
    }
}

/// Body of `POST /api/students`.
///
/// Missing JSON fields deserialize to their zero value so validation can report them by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewStudent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: i64,
}

/// Partial update: `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
}

impl StudentUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}
