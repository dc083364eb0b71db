use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::{SemesterId, SemesterOrder, UserId};
use super::repository::{GradebookRepository, RepositoryError};
use super::service::{GradebookService, GradebookServiceError};

/// Router builder exposing the per-user gradebook endpoints.
pub fn gradebook_router<R>(service: Arc<GradebookService<R>>) -> Router
where
    R: GradebookRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/users/:user_id/transcript",
            get(transcript_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/semester-order",
            put(reorder_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/semesters/:semester_id",
            get(semester_handler::<R>),
        )
        .route("/api/v1/users/:user_id/import", post(import_handler::<R>))
        .with_state(service)
}

pub(crate) async fn transcript_handler<R>(
    State(service): State<Arc<GradebookService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: GradebookRepository + 'static,
{
    match service.transcript(&UserId(user_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn semester_handler<R>(
    State(service): State<Arc<GradebookService<R>>>,
    Path((user_id, semester_id)): Path<(String, String)>,
) -> Response
where
    R: GradebookRepository + 'static,
{
    match service.semester_report(&UserId(user_id), &SemesterId(semester_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reorder_handler<R>(
    State(service): State<Arc<GradebookService<R>>>,
    Path(user_id): Path<String>,
    axum::Json(order): axum::Json<Vec<SemesterOrder>>,
) -> Response
where
    R: GradebookRepository + 'static,
{
    match service.reorder(&UserId(user_id), order) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn import_handler<R>(
    State(service): State<Arc<GradebookService<R>>>,
    Path(user_id): Path<String>,
    body: String,
) -> Response
where
    R: GradebookRepository + 'static,
{
    let user_id = UserId(user_id);
    match service.import(&user_id, Cursor::new(body.into_bytes()), Utc::now()) {
        Ok(imported) => {
            let payload = json!({
                "user_id": user_id,
                "semesters_imported": imported,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: GradebookServiceError) -> Response {
    let status = match &err {
        GradebookServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        GradebookServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        GradebookServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        GradebookServiceError::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GradebookServiceError::Import(_) => StatusCode::BAD_REQUEST,
    };

    let payload = match &err {
        GradebookServiceError::Input(input) => json!({
            "error": err.to_string(),
            "violations": input.violations(),
        }),
        _ => json!({ "error": err.to_string() }),
    };

    (status, axum::Json(payload)).into_response()
}
