use user_service::config::AppConfig;
use user_service::lifecycle::{self, Shutdown, Started};
use user_service::observability::logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.server.port,
        origin = %config.cors.allowed_origin,
        mode = ?config.lifecycle.mode,
        fatal_on_db_failure = config.lifecycle.fatal_on_db_failure,
        "configuration loaded"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    match lifecycle::start(config, &shutdown).await {
        Ok(Started::Completed) => tracing::info!("shutdown complete"),
        Ok(Started::Hosted(_)) => {
            // The binary is the standalone entry point; a hosted-mode
            // config only makes sense for a host linking the library.
            tracing::warn!("hosted mode has no host in a standalone process; exiting");
        }
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            std::process::exit(1);
        }
    }
}
