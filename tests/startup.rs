//! Integration tests for startup sequencing and failure policy.

use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use user_service::config::{AppConfig, RunMode};
use user_service::lifecycle::{self, App, Shutdown, Started, StartupError};

mod common;

fn hosted_config(database_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.url = database_url.to_string();
    config.lifecycle.mode = RunMode::Hosted;
    config.lifecycle.fatal_on_db_failure = false;
    config
}

/// Bind an ephemeral listener and serve the hosted application, the way
/// an external host would.
async fn host(app: App) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn standalone_database_failure_is_fatal_before_binding() {
    let mut config = AppConfig::default();
    config.database.url = "postgres://db.internal/app".to_string();

    let shutdown = Shutdown::new();
    let err = lifecycle::start(config, &shutdown).await.unwrap_err();
    assert!(matches!(err, StartupError::Database(_)));
}

#[tokio::test]
async fn hosted_mode_survives_a_database_failure() {
    let shutdown = Shutdown::new();
    let started = lifecycle::start(hosted_config("postgres://db.internal/app"), &shutdown)
        .await
        .unwrap();
    let app = match started {
        Started::Hosted(app) => app,
        Started::Completed => panic!("hosted mode must not serve a socket"),
    };

    let addr = host(app).await;
    let client = common::client();

    // The application is invokable; health is unaffected.
    let res = client
        .get(format!("http://{addr}/api/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"status": "ok"}));

    // Database-dependent routes observe the absent connection.
    let res = client
        .get(format!("http://{addr}/api/user"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn hosted_mode_serves_requests_once_connected() {
    let shutdown = Shutdown::new();
    let started = lifecycle::start(hosted_config("memory://local"), &shutdown)
        .await
        .unwrap();
    let app = match started {
        Started::Hosted(app) => app,
        Started::Completed => panic!("hosted mode must not serve a socket"),
    };

    let addr = host(app).await;
    let client = common::client();

    let res = client
        .post(format!("http://{addr}/api/user"))
        .json(&json!({"name": "Ada", "email": "ada@example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!("http://{addr}/api/user"))
        .send()
        .await
        .unwrap();
    let users: Value = res.json().await.unwrap();
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn standalone_serves_until_shutdown() {
    let mut config = AppConfig::default();
    config.server.bind_address = "127.0.0.1".to_string();
    // Ephemeral port: the lifecycle binds it, we only assert the run
    // completes once shutdown fires.
    config.server.port = 0;

    let shutdown = Shutdown::new();
    let coordinator = shutdown.clone();
    let run = tokio::spawn(async move { lifecycle::start(config, &shutdown).await });

    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    coordinator.trigger();

    let started = run.await.unwrap().unwrap();
    assert!(matches!(started, Started::Completed));
}
