//! Shared utilities for the integration suites.
//!
//! Services bind ephemeral ports so suites can run in parallel. The
//! listener is bound before the serve task starts, so requests queue in
//! the backlog even if they race the spawn.

use std::net::SocketAddr;

use flaky_lab::config::{ClientConfig, ServerConfig};
use flaky_lab::{ClientService, FlakyServer, Shutdown};
use tokio::net::TcpListener;

/// Start a flaky server; returns its address and the shutdown handle.
pub async fn spawn_flaky_server(config: ServerConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = FlakyServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Start a client service; returns its address and the shutdown handle.
#[allow(dead_code)]
pub async fn spawn_client_service(config: ClientConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let service = ClientService::new(config).unwrap();
    tokio::spawn(async move {
        let _ = service.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// A non-pooling client, since the spawned services are short-lived.
#[allow(dead_code)]
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
