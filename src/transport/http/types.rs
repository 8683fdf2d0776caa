use crate::domain::model::FieldError;
use crate::storage::Storage;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

/// State shared by every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

/// JSON envelope for everything that is not a bare record or list.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Present only on validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

impl ApiResponse {
    /// `{"success": true}`
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            fields: None,
        }
    }

    pub fn with_data(data: JsonValue) -> Self {
        Self {
            data: Some(data),
            ..Self::ok()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            fields: None,
        }
    }
}
