//! Configuration loading from the environment.
//!
//! The environment is read exactly once, at process entry. Everything
//! downstream receives the assembled [`AppConfig`] by value; nothing else
//! in the crate consults environment variables.

use std::env;

use thiserror::Error;

use crate::config::schema::{AppConfig, RunMode};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppConfig {
    /// Assemble and validate the configuration from the process
    /// environment.
    ///
    /// Recognized variables: `PORT`, `BASE_URL`, `DATABASE_URL`,
    /// `APP_MODE` (`standalone` | `hosted`) and `DB_FAILURE_FATAL`
    /// (`true` | `false`). Unset variables fall back to defaults; the
    /// failure-policy default tracks the mode (fatal when standalone,
    /// non-fatal when hosted) unless overridden explicitly.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Assemble the configuration from an arbitrary variable lookup.
    ///
    /// Split out from [`AppConfig::from_env`] so the mapping is testable
    /// without mutating process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();

        if let Some(port) = lookup("PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: port.clone(),
            })?;
        }

        if let Some(origin) = lookup("BASE_URL") {
            config.cors.allowed_origin = origin;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            config.database.url = url;
        }

        if let Some(mode) = lookup("APP_MODE") {
            config.lifecycle.mode = match mode.as_str() {
                "standalone" => RunMode::Standalone,
                "hosted" => RunMode::Hosted,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "APP_MODE",
                        value: mode,
                    })
                }
            };
        }

        // Failure policy defaults to the mode's convention; an explicit
        // setting wins.
        config.lifecycle.fatal_on_db_failure = match lookup("DB_FAILURE_FATAL") {
            Some(flag) => flag.parse().map_err(|_| ConfigError::InvalidValue {
                name: "DB_FAILURE_FATAL",
                value: flag.clone(),
            })?,
            None => config.lifecycle.mode == RunMode::Standalone,
        };

        validate_config(&config).map_err(ConfigError::Validation)?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.cors.allowed_origin, "*");
        assert_eq!(config.lifecycle.mode, RunMode::Standalone);
        assert!(config.lifecycle.fatal_on_db_failure);
    }

    #[test]
    fn variables_override_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("BASE_URL", "https://app.example.com"),
            ("DATABASE_URL", "memory://primary"),
        ]))
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cors.allowed_origin, "https://app.example.com");
        assert_eq!(config.database.url, "memory://primary");
    }

    #[test]
    fn hosted_mode_defaults_to_non_fatal() {
        let config = AppConfig::from_lookup(lookup(&[("APP_MODE", "hosted")])).unwrap();
        assert_eq!(config.lifecycle.mode, RunMode::Hosted);
        assert!(!config.lifecycle.fatal_on_db_failure);
    }

    #[test]
    fn explicit_failure_policy_wins_over_mode() {
        let config = AppConfig::from_lookup(lookup(&[
            ("APP_MODE", "hosted"),
            ("DB_FAILURE_FATAL", "true"),
        ]))
        .unwrap();
        assert!(config.lifecycle.fatal_on_db_failure);
    }

    #[test]
    fn garbage_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "PORT", .. }));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("APP_MODE", "production")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "APP_MODE", .. }));
    }

    #[test]
    fn invalid_origin_fails_validation() {
        let err = AppConfig::from_lookup(lookup(&[("BASE_URL", "no scheme here")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
