// src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors a handler can hand back to the client. The body mirrors the
/// `{"detail": ...}` shape the frontend already expects.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        tracing::debug!(status = status.as_u16(), error = %self, "request rejected");

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
