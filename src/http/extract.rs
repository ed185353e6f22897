//! Handler-side extractors over pipeline annotations.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::http::error::ApiError;
use crate::http::middleware::ParsedBody;

/// Typed view of the decoded request body.
///
/// The body was decoded by the parsing stages; this extractor only shapes
/// the decoded value into `T`. A request that never carried a decodable
/// body rejects with 400.
pub struct Payload<T>(pub T);

impl<S, T> FromRequestParts<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let body = parts
            .extensions
            .get::<ParsedBody>()
            .ok_or(ApiError::MissingBody)?;

        serde_json::from_value(body.0.as_ref().clone())
            .map(Payload)
            .map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}
