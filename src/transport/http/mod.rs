pub mod error;
pub mod router;
pub mod server;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod health;
    pub mod students;
}

pub use error::ApiError;
pub use router::{create_router, ApiDoc};
pub use server::{serve, shutdown_signal};
pub use types::{ApiResponse, AppState};
