//! Configuration schema definitions.
//!
//! The complete configuration structure for the service. All types derive
//! Serde traits and carry defaults so a minimal environment still yields a
//! runnable config.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, port, body cap).
    pub server: ServerConfig,

    /// Cross-origin policy.
    pub cors: CorsConfig,

    /// Database connector settings.
    pub database: DatabaseConfig,

    /// Startup behavior (execution mode, failure policy).
    pub lifecycle: LifecycleConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind in standalone mode.
    pub bind_address: String,

    /// Port to bind in standalone mode.
    pub port: u16,

    /// Maximum accepted request-body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Socket address string for the listener.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Cross-origin policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origin: a single origin URL, or `"*"` for any.
    pub allowed_origin: String,

    /// Whether credentialed cross-origin requests are accepted.
    pub allow_credentials: bool,

    /// Methods accepted by the origin policy. Requests using any other
    /// method are rejected before reaching the router.
    pub allowed_methods: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "*".to_string(),
            allow_credentials: true,
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

/// Database connector configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL handed to the connector.
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "memory://local".to_string(),
        }
    }
}

/// Startup behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Execution mode: standalone binds a socket, hosted hands the
    /// composed application back to the caller.
    pub mode: RunMode,

    /// Whether a failed database connection aborts startup. Defaults
    /// track the mode: fatal when standalone, non-fatal when hosted.
    pub fatal_on_db_failure: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Standalone,
            fatal_on_db_failure: true,
        }
    }
}

/// Execution mode for the lifecycle controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// The process owns the listening socket.
    #[default]
    Standalone,

    /// An external host invokes the composed application per request.
    Hosted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.cors.allowed_origin, "*");
        assert!(config.cors.allow_credentials);
        assert_eq!(config.cors.allowed_methods.len(), 7);
        assert_eq!(config.database.url, "memory://local");
        assert_eq!(config.lifecycle.mode, RunMode::Standalone);
        assert!(config.lifecycle.fatal_on_db_failure);
    }

    #[test]
    fn socket_addr_joins_host_and_port() {
        let server = ServerConfig {
            port: 8080,
            ..Default::default()
        };
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }
}
