//! Shared utilities for integration tests.

// Each test binary links a subset of these helpers.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use user_service::config::AppConfig;
use user_service::db;
use user_service::http::HttpServer;
use user_service::lifecycle::Shutdown;

/// A running server bound to an ephemeral local port.
///
/// Holds the shutdown coordinator: dropping it would close the broadcast
/// channel and drain the server mid-test.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Spawn the real server with a connected database.
pub async fn spawn_server(config: AppConfig) -> TestServer {
    let slot = db::empty_slot();
    let database = db::connect(&config.database).await.unwrap();
    slot.store(Some(Arc::new(database)));
    spawn_with_slot(config, slot).await
}

/// Spawn the real server with an empty connection slot, as after a
/// non-fatal connection failure.
pub async fn spawn_server_without_db(config: AppConfig) -> TestServer {
    spawn_with_slot(config, db::empty_slot()).await
}

async fn spawn_with_slot(config: AppConfig, slot: db::DbSlot) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, slot);
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestServer { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
