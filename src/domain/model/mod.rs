//! Domain model for student records.
//!
//! [`Student`] is the only persisted entity. [`NewStudent`] and [`StudentUpdate`] are the
//! shapes callers submit; they are validated here, before anything reaches storage.

pub mod student;
pub mod validation;

pub use student::{NewStudent, Student, StudentUpdate};
pub use validation::{FieldError, Validate};
