use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (storage reachable)", body = ApiResponse),
        (status = 503, description = "Service is unhealthy (storage unreachable)", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.storage.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::with_data(serde_json::json!({ "status": "ok" }))),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: Some(serde_json::json!({ "status": "unhealthy" })),
                    ..ApiResponse::failure(format!("storage ping failed: {}", e))
                }),
            )
        }
    }
}
