//! Startup orchestration.
//!
//! # Responsibilities
//! - Compose the HTTP application
//! - Attempt the one-shot database connection and apply the failure policy
//! - Standalone: bind the configured socket and serve until shutdown
//! - Hosted: hand the composed application back without binding

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{AppConfig, RunMode};
use crate::db::{self, DbError};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;

/// Error type for startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database connection failed: {0}")]
    Database(#[from] DbError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Composed application handed to an external host.
///
/// The host owns the socket; this type only exposes the request-processing
/// pipeline.
#[derive(Debug)]
pub struct App {
    server: HttpServer,
}

impl App {
    /// The router the host serves per request.
    pub fn router(&self) -> axum::Router {
        self.server.router()
    }
}

/// Outcome of [`start`].
#[derive(Debug)]
pub enum Started {
    /// Standalone run served to completion; the shutdown signal fired.
    Completed,

    /// Hosted mode: no socket was bound, the host drives the application.
    Hosted(App),
}

/// One-shot startup operation.
///
/// The application is composed before the connection attempt, so in hosted
/// mode it is invokable even while (or after) the connector fails; requests
/// that need the database observe the empty slot as a 503. A fatal
/// connection failure returns before any socket is bound.
pub async fn start(config: AppConfig, shutdown: &Shutdown) -> Result<Started, StartupError> {
    let slot = db::empty_slot();
    let server = HttpServer::new(config.clone(), slot.clone());

    match db::connect(&config.database).await {
        Ok(database) => {
            slot.store(Some(Arc::new(database)));
            tracing::info!(url = %config.database.url, "database connected");
        }
        Err(e) if config.lifecycle.fatal_on_db_failure => return Err(e.into()),
        Err(e) => {
            tracing::warn!(error = %e, "database connection failed; serving without it");
        }
    }

    match config.lifecycle.mode {
        RunMode::Standalone => {
            let addr = config.server.socket_addr();
            let listener =
                TcpListener::bind(&addr)
                    .await
                    .map_err(|source| StartupError::Bind {
                        addr: addr.clone(),
                        source,
                    })?;
            tracing::info!(address = %addr, "server running");

            server
                .run(listener, shutdown.subscribe())
                .await
                .map_err(StartupError::Serve)?;
            Ok(Started::Completed)
        }
        RunMode::Hosted => {
            tracing::info!("hosted mode: application handed to host, no socket bound");
            Ok(Started::Hosted(App { server }))
        }
    }
}
