use crate::domain::model::{FieldError, NewStudent, Student, StudentUpdate};
use crate::transport::http::handlers::{health, students};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        students::list_students_handler,
        students::create_student_handler,
        students::get_student_handler,
        students::update_student_handler,
        students::delete_student_handler
    ),
    components(schemas(ApiResponse, FieldError, Student, NewStudent, StudentUpdate))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/students",
            get(students::list_students_handler).post(students::create_student_handler),
        )
        .route(
            "/api/students/:id",
            get(students::get_student_handler)
                .patch(students::update_student_handler)
                .delete(students::delete_student_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
