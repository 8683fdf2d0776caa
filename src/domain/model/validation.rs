//! Field-level checks for inbound payloads.
//!
//! A zero `age` counts as missing, the same way an empty string does. Callers
//! therefore cannot register an age of zero.

use crate::domain::model::{NewStudent, StudentUpdate};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// One failed check, reported back to the client as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    pub fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            reason: "required".to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field {} is {}", self.field, self.reason)
    }
}

pub trait Validate {
    /// Returns every failing field, not just the first.
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

impl Validate for NewStudent {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.is_empty() {
            errors.push(FieldError::required("name"));
        }
        if self.email.is_empty() {
            errors.push(FieldError::required("email"));
        }
        if self.age == 0 {
            errors.push(FieldError::required("age"));
        }
        finish(errors)
    }
}

impl Validate for StudentUpdate {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.as_deref() == Some("") {
            errors.push(FieldError::required("name"));
        }
        if self.email.as_deref() == Some("") {
            errors.push(FieldError::required("email"));
        }
        if self.age == Some(0) {
            errors.push(FieldError::required("age"));
        }
        finish(errors)
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
