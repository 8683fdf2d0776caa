use crate::domain::model::FieldError;
use crate::storage::StorageError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("empty body")]
    EmptyBody,

    #[error("invalid JSON body: {0}")]
    MalformedJson(String),

    #[error("validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("invalid student id: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyBody
            | ApiError::MalformedJson(_)
            | ApiError::Validation(_)
            | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            ApiError::Storage(StorageError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::Storage(StorageError::Backend(err)) => {
                tracing::error!(error = ?err, "storage backend failure");
                ApiResponse::failure("an internal storage error occurred")
            }
            ApiError::Validation(fields) => {
                let message = format!("validation failed: {}", join_fields(&fields));
                ApiResponse {
                    fields: Some(fields),
                    ..ApiResponse::failure(message)
                }
            }
            other => ApiResponse::failure(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
