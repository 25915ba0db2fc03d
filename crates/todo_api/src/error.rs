//! HTTP error taxonomy and status mapping.
//!
//! Validation -> 400 with a JSON error detail; not-found -> 404 with an
//! empty body; anything unexpected -> 500, logged here and not echoed to
//! the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use todo_core::{RepoError, ServiceError};

#[derive(Debug)]
pub enum ApiError {
    /// Request payload failed domain validation.
    Validation(String),
    /// Referenced todo/comment does not exist.
    NotFound,
    /// Unexpected fault; details stay in the log.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(detail) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": detail })),
            )
                .into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Internal(detail) => {
                error!("event=request_failed module=api status=error error={detail}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Validation(err) => Self::Validation(err.to_string()),
            ServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Internal(value.to_string())
    }
}
