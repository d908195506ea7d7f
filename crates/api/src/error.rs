use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_core::employee::field_messages;
use roster_core::error::CoreError;
use serde_json::json;

/// Message returned for every 5xx; details only go to the log.
const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] so every handler failure is translated to a
/// transport response in exactly one place.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `roster_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed or non-JSON bodies are client errors, reported as 400.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // --- CoreError variants ---
            AppError::Core(CoreError::NotFound { entity, id }) => {
                tracing::debug!(entity, id, "Entity not found");
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Core(CoreError::InvalidFields(errors)) => {
                let body = json!({
                    "error": "One or more validation errors occurred.",
                    "code": "VALIDATION_ERROR",
                    "errors": field_messages(&errors),
                });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                internal_error_response()
            }

            // --- Database errors ---
            AppError::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND.into_response(),
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal_error_response()
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                let body = json!({
                    "error": msg,
                    "code": "BAD_REQUEST",
                });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error_response()
            }
        }
    }
}

fn internal_error_response() -> Response {
    let body = json!({
        "error": INTERNAL_ERROR_MESSAGE,
        "code": "INTERNAL_ERROR",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
}

/// Response for a handler that panicked, used by `CatchPanicLayer`.
///
/// The panic payload is logged and the client receives the same opaque 500
/// as any other internal error.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::InternalError(format!("handler panicked: {detail}")).into_response()
}
