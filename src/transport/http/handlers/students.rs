use crate::domain::model::{NewStudent, Student, StudentUpdate};
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{decode_payload, parse_id};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students, unordered", body = [Student]),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_students_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.storage.get_students().await?;
    Ok(Json(students))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = NewStudent,
    responses(
        (status = 202, description = "Student accepted; Location points at the new record", body = ApiResponse),
        (status = 400, description = "Empty body, malformed JSON or failed validation", body = ApiResponse),
        (status = 409, description = "Email already registered", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_student_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payload: NewStudent = decode_payload(&body)?;

    let id = state
        .storage
        .create_student(&payload.name, &payload.email, payload.age)
        .await?;
    tracing::info!(id, "student created");

    Ok((
        StatusCode::ACCEPTED,
        [(header::LOCATION, format!("/api/students/{}", id))],
        Json(ApiResponse::ok()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student id")
    ),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 400, description = "Id is not an integer", body = ApiResponse),
        (status = 404, description = "No such student", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_student_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    let id = parse_id(&id)?;
    let student = state.storage.get_student_by_id(id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student id")
    ),
    request_body = StudentUpdate,
    responses(
        (status = 200, description = "Merged record after the update", body = Student),
        (status = 400, description = "Bad id, empty body, malformed JSON or failed validation", body = ApiResponse),
        (status = 404, description = "No such student", body = ApiResponse),
        (status = 409, description = "Email already registered", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn update_student_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Student>, ApiError> {
    let id = parse_id(&id)?;
    let update: StudentUpdate = decode_payload(&body)?;

    let student = state.storage.update_student(&update, id).await?;
    tracing::info!(id, "student updated");
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student id")
    ),
    responses(
        (status = 200, description = "Student deleted", body = ApiResponse),
        (status = 400, description = "Id is not an integer", body = ApiResponse),
        (status = 404, description = "No such student", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn delete_student_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id = parse_id(&id)?;
    state.storage.delete_student_by_id(id).await?;
    tracing::info!(id, "student deleted");
    Ok(Json(ApiResponse::ok()))
}
