//! Configuration validation.
//!
//! Semantic checks on top of what Serde guarantees syntactically. Runs as a
//! pure function over the assembled config and reports all violations, not
//! just the first.

use axum::http::Method;
use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("cors.allowed_origin must be \"*\" or an origin URL, got {0:?}")]
    InvalidOrigin(String),

    #[error("cors.allowed_methods contains an unrecognized method {0:?}")]
    InvalidMethod(String),

    #[error("cors.allowed_methods must not be empty")]
    EmptyMethods,

    #[error("server.bind_address is not a valid IP address: {0:?}")]
    InvalidBindAddress(String),

    #[error("database.url is not a valid URL: {0:?}")]
    InvalidDatabaseUrl(String),
}

/// Validate the assembled configuration.
///
/// Collects every violation so operators can fix a broken environment in
/// one pass.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.cors.allowed_origin != "*" && Url::parse(&config.cors.allowed_origin).is_err() {
        errors.push(ValidationError::InvalidOrigin(
            config.cors.allowed_origin.clone(),
        ));
    }

    if config.cors.allowed_methods.is_empty() {
        errors.push(ValidationError::EmptyMethods);
    }
    for method in &config.cors.allowed_methods {
        if Method::from_bytes(method.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidMethod(method.clone()));
        }
    }

    if config.server.bind_address.parse::<std::net::IpAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.server.bind_address.clone(),
        ));
    }

    if Url::parse(&config.database.url).is_err() {
        errors.push(ValidationError::InvalidDatabaseUrl(
            config.database.url.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
