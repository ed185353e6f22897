//! Health-check endpoint.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::http::AppState;

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health-check routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health_handler))
}

/// Always `200 {"status":"ok"}`, no side effects, independent of the
/// database slot.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_exactly_status_ok() {
        let json = serde_json::to_value(HealthResponse { status: "ok" }).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }
}
