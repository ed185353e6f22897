//! Centralized error formatting.
//!
//! Every per-request failure in the pipeline converges on [`ApiError`];
//! its response conversion is the only place that writes an error body.
//! Server-side detail for 5xx responses goes to the log, never to the
//! client.

use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Per-request error taxonomy.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no route matched {method} {path}")]
    RouteNotFound { method: Method, path: String },

    #[error("origin {0:?} is not allowed")]
    OriginNotAllowed(String),

    #[error("method {0} is not allowed by the origin policy")]
    MethodNotAllowed(String),

    #[error("malformed request body: {0}")]
    UnreadableBody(String),

    #[error("a request body is required")]
    MissingBody,

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("invalid user id {0:?}")]
    InvalidUserId(String),

    #[error("missing or invalid session cookie")]
    Unauthorized,

    #[error("user {0} not found")]
    UserNotFound(uuid::Uuid),

    #[error("database connection is not available")]
    DatabaseUnavailable,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RouteNotFound { .. } | ApiError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::OriginNotAllowed(_) | ApiError::MethodNotAllowed(_) => {
                StatusCode::FORBIDDEN
            }
            ApiError::UnreadableBody(_)
            | ApiError::MissingBody
            | ApiError::InvalidBody(_)
            | ApiError::InvalidUserId(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Wire shape of every error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // 5xx detail stays in the log; the client sees a generic message.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            tracing::debug!(error = %self, "request rejected");
            self.to_string()
        };

        let body = ErrorResponse {
            error: message,
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

/// Terminal fallback for requests no route matched.
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound {
        method,
        path: uri.path().to_string(),
    }
}
