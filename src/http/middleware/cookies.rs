//! Cookie-parsing stage.
//!
//! Extracts name/value pairs from the `Cookie` header into a [`Cookies`]
//! map attached to the request. An absent header yields an empty map,
//! never an error; pairs without `=` keep an empty value.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request};
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

/// Parsed cookies, available to every downstream handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cookies(HashMap<String, String>);

impl Cookies {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse a `Cookie` header value.
pub fn parse_cookie_header(value: &str) -> Cookies {
    let map = value
        .split(';')
        .filter_map(|pair| {
            let mut parts = pair.trim().splitn(2, '=');
            let name = parts.next()?.trim();
            if name.is_empty() {
                return None;
            }
            let value = parts.next().unwrap_or("").trim();
            Some((name.to_string(), value.to_string()))
        })
        .collect();
    Cookies(map)
}

/// Pipeline stage attaching the cookie map to the request.
pub async fn attach_cookies(mut request: Request, next: Next) -> Response {
    let cookies = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(parse_cookie_header)
        .unwrap_or_default();

    request.extensions_mut().insert(cookies);
    next.run(request).await
}

impl<S> FromRequestParts<S> for Cookies
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Cookies>().cloned().unwrap_or_default())
    }
}
