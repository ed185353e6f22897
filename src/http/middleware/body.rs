//! Body-parsing stages.
//!
//! JSON and URL-encoded bodies are decoded once, here, and attached to the
//! request as a [`ParsedBody`] annotation; handlers consume the annotation
//! through the [`Payload`](crate::http::extract::Payload) extractor and
//! never re-read the body. Malformed input becomes a client error through
//! the error pipeline — the process never crashes on a bad body, and the
//! raw bytes are never echoed back.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Decoded request body, attached to the request extensions.
#[derive(Debug, Clone)]
pub struct ParsedBody(pub Arc<serde_json::Value>);

enum Encoding {
    Json,
    // Bracket syntax (`a[b]=c`) nests.
    Form,
}

/// Pipeline stage decoding JSON and URL-encoded bodies.
pub async fn parse_body(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_ascii_lowercase());

    let limit = state.config.server.max_body_bytes;
    let request = match content_type.as_deref() {
        Some(ct) if ct.starts_with("application/json") => {
            annotate(request, limit, Encoding::Json).await?
        }
        Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
            annotate(request, limit, Encoding::Form).await?
        }
        _ => request,
    };

    Ok(next.run(request).await)
}

/// Buffer the body, decode it, and re-assemble the request with the
/// decoded value attached. An empty body attaches nothing; whether a body
/// is required is the handler's call.
async fn annotate(request: Request, limit: usize, encoding: Encoding) -> Result<Request, ApiError> {
    let (mut parts, body) = request.into_parts();

    let bytes = to_bytes(body, limit)
        .await
        .map_err(|_| ApiError::UnreadableBody("failed to read request body".to_string()))?;

    if !bytes.is_empty() {
        let value = match encoding {
            Encoding::Json => serde_json::from_slice::<serde_json::Value>(&bytes)
                .map_err(|e| ApiError::UnreadableBody(e.to_string()))?,
            Encoding::Form => serde_qs::Config::new()
                .max_depth(5)
                .deserialize_bytes::<serde_json::Value>(&bytes)
                .map_err(|e| ApiError::UnreadableBody(e.to_string()))?,
        };
        parts.extensions.insert(ParsedBody(Arc::new(value)));
    }

    Ok(Request::from_parts(parts, Body::from(bytes)))
}
