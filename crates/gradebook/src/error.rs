use crate::config::ConfigError;
use crate::gpa::GradeInputError;
use crate::import::TranscriptImportError;
use crate::records::{GradebookServiceError, RepositoryError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Import(TranscriptImportError),
    Input(GradeInputError),
    Gradebook(GradebookServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Input(err) => write!(f, "{}", err),
            AppError::Gradebook(err) => write!(f, "gradebook error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Gradebook(err) => Some(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Import(_) | AppError::Gradebook(GradebookServiceError::Import(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Input(_) | AppError::Gradebook(GradebookServiceError::Input(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Gradebook(GradebookServiceError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Gradebook(GradebookServiceError::Repository(RepositoryError::Conflict)) => {
                StatusCode::CONFLICT
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Gradebook(GradebookServiceError::Repository(
                RepositoryError::Unavailable(_),
            )) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<TranscriptImportError> for AppError {
    fn from(value: TranscriptImportError) -> Self {
        Self::Import(value)
    }
}

impl From<GradeInputError> for AppError {
    fn from(value: GradeInputError) -> Self {
        Self::Input(value)
    }
}

impl From<GradebookServiceError> for AppError {
    fn from(value: GradebookServiceError) -> Self {
        Self::Gradebook(value)
    }
}
