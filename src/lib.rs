pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::model::{NewStudent, Student, StudentUpdate};
pub use infra::Config;
pub use storage::{InMemoryStorage, SqliteStorage, Storage, StorageError};
