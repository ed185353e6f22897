//! User route group, mounted under `/api/user`.
//!
//! Handlers here are deliberately thin: they consume the pipeline's
//! annotations (decoded body, cookie map), touch the database handle, and
//! surface every failure as an [`ApiError`]. Requests arriving while the
//! connection slot is empty observe a 503 at the point of use.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::User;
use crate::http::error::ApiError;
use crate::http::extract::Payload;
use crate::http::middleware::Cookies;
use crate::http::AppState;

/// The mountable route group.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/me", get(current_user))
        .route("/{id}", get(get_user))
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

async fn create_user(
    State(state): State<AppState>,
    Payload(body): Payload<CreateUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::InvalidBody("name must not be empty".to_string()));
    }
    if body.email.trim().is_empty() {
        return Err(ApiError::InvalidBody("email must not be empty".to_string()));
    }

    let db = state.database()?;
    let user = db.insert_user(body.name, body.email, body.metadata).await;
    tracing::info!(user_id = %user.id, "user created");

    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let db = state.database()?;
    Ok(Json(db.users().await))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::InvalidUserId(id))?;

    let db = state.database()?;
    db.user(id).await.map(Json).ok_or(ApiError::UserNotFound(id))
}

/// Resolve the `session` cookie to its user.
async fn current_user(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Json<User>, ApiError> {
    let session = cookies.get("session").ok_or(ApiError::Unauthorized)?;
    let id = Uuid::parse_str(session).map_err(|_| ApiError::Unauthorized)?;

    let db = state.database()?;
    // A stale session reads as unauthorized, not as a missing resource.
    db.user(id).await.map(Json).ok_or(ApiError::Unauthorized)
}
