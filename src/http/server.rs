//! HTTP application composition.
//!
//! # Responsibilities
//! - Build the axum Router with every pipeline stage in its fixed order
//! - Hold the shared application state (config, CORS policy, db slot)
//! - Serve a bound listener until the shutdown coordinator fires
//!
//! Stage order, applied to every request:
//! request id → trace → CORS → body parsing → cookie parsing →
//! health endpoint | route group | not-found fallback, with every error
//! funneled through the formatter in `http::error`.

use std::sync::Arc;

use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::db::{Database, DbSlot};
use crate::http::error::{self, ApiError};
use crate::http::middleware::{body, cookies, cors, CorsPolicy};
use crate::routes;

/// Application state injected into stages and handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub cors: Arc<CorsPolicy>,
    pub db: DbSlot,
}

impl AppState {
    /// The connected database, or the 503 the error pipeline turns an
    /// empty slot into.
    pub fn database(&self) -> Result<Arc<Database>, ApiError> {
        self.db.load_full().ok_or(ApiError::DatabaseUnavailable)
    }
}

/// HTTP server for the service.
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Compose the application for the given configuration and
    /// connection slot.
    pub fn new(config: AppConfig, db: DbSlot) -> Self {
        let cors = Arc::new(CorsPolicy::from_config(&config.cors));
        let state = AppState {
            config: Arc::new(config),
            cors,
            db,
        };
        Self {
            router: build_router(state),
        }
    }

    /// The composed application, for hosts that own the socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve the given listener until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the router. Layer order in the `ServiceBuilder` is the pipeline
/// order; nothing registers a stage anywhere else.
fn build_router(state: AppState) -> Router {
    let stages = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            cors::enforce_cors,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            body::parse_body,
        ))
        .layer(middleware::from_fn(cookies::attach_cookies));

    Router::new()
        .merge(routes::health::health_routes())
        .nest("/api/user", routes::users::user_routes())
        .fallback(error::not_found)
        .layer(stages)
        .with_state(state)
}
