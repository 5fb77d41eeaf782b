//! Gate error type. Every 4xx/5xx that is not an action envelope is JSON
//! with a consistent shape.
//!
//! ```json
//! { "code": "not_found", "message": "action not found" }
//! ```
//!
//! `not_applicable` also names the offending payload field when known.

use ao_actions::{ErrorKind, ValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub field: Option<&'static str>,
}

impl AppError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", format!("{resource} not found"))
    }

    pub fn unsupported_media_type() -> Self {
        Self::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "unsupported_media_type",
            "content-type must be application/json",
        )
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    /// The payload does not fit the action's schema.
    pub fn not_applicable(action: &str, err: &ValidationError) -> Self {
        Self {
            field: err.field(),
            ..Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "not_applicable",
                format!("{action} does not apply: {err}"),
            )
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            code: self.code,
            message: self.message,
            field: self.field,
        };
        (self.status, Json(body)).into_response()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.status.as_u16(), self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// HTTP status for a failed action envelope.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ValidationError | ErrorKind::TransactionFailed => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::SecurityError => StatusCode::FORBIDDEN,
        ErrorKind::InsufficientBalance => StatusCode::PAYMENT_REQUIRED,
        ErrorKind::ServiceNotInitialized => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::NetworkError | ErrorKind::ProtocolError => StatusCode::BAD_GATEWAY,
        ErrorKind::ConfigurationError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
