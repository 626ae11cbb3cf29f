//! End-to-end behavior of each client mechanism against a live flaky
//! server.

mod common;

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use flaky_lab::config::{ClientConfig, ServerConfig};
use flaky_lab::Shutdown;

/// Spawn a flaky server plus a client service pointed at it.
async fn spawn_pair(
    server: ServerConfig,
    mut client: ClientConfig,
) -> (SocketAddr, Shutdown, Shutdown) {
    let (server_addr, server_shutdown) = common::spawn_flaky_server(server).await;
    client.server_url = format!("http://{server_addr}");
    let (client_addr, client_shutdown) = common::spawn_client_service(client).await;
    (client_addr, server_shutdown, client_shutdown)
}

#[tokio::test]
async fn hyper_mixed_reports_true_when_the_upstream_succeeds() {
    let server = ServerConfig {
        failure_probability: 0.0,
        max_delay_ms: 25,
        ..Default::default()
    };
    let (addr, s1, s2) = spawn_pair(server, ClientConfig::default()).await;

    let res = common::test_client()
        .get(format!("http://{addr}/hyper/mixed"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "true");

    s1.trigger();
    s2.trigger();
}

#[tokio::test]
async fn hyper_mixed_surfaces_upstream_failure_as_bad_gateway() {
    let server = ServerConfig {
        failure_probability: 1.0,
        ..Default::default()
    };
    let (addr, s1, s2) = spawn_pair(server, ClientConfig::default()).await;

    let res = common::test_client()
        .get(format!("http://{addr}/hyper/mixed"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);

    s1.trigger();
    s2.trigger();
}

#[tokio::test]
async fn hyper_wait_timeout_reports_false_within_the_deadline() {
    let (addr, s1, s2) = spawn_pair(ServerConfig::default(), ClientConfig::default()).await;

    let start = Instant::now();
    let res = common::test_client()
        .get(format!("http://{addr}/hyper/wait-timeout"))
        .send()
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "false");
    assert!(
        elapsed < Duration::from_secs(2),
        "a 200ms timeout took {elapsed:?}"
    );

    s1.trigger();
    s2.trigger();
}

#[tokio::test]
async fn hyper_wait_guarded_is_aborted_by_the_timeout_layer() {
    let (addr, s1, s2) = spawn_pair(ServerConfig::default(), ClientConfig::default()).await;

    let res = common::test_client()
        .get(format!("http://{addr}/hyper/wait-guarded"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 408);

    s1.trigger();
    s2.trigger();
}

#[tokio::test]
async fn reqwest_wait_timeout_maps_to_gateway_timeout() {
    let (addr, s1, s2) = spawn_pair(ServerConfig::default(), ClientConfig::default()).await;

    let res = common::test_client()
        .get(format!("http://{addr}/reqwest/wait-timeout"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 504);

    s1.trigger();
    s2.trigger();
}

#[tokio::test]
async fn reqwest_wait_accepts_any_answered_status() {
    let server = ServerConfig {
        hold_ms: Some(20),
        ..Default::default()
    };
    let (addr, s1, s2) = spawn_pair(server, ClientConfig::default()).await;

    let res = common::test_client()
        .get(format!("http://{addr}/reqwest/wait"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "true");

    s1.trigger();
    s2.trigger();
}

#[tokio::test]
async fn reqwest_connect_error_maps_to_bad_gateway() {
    // A freshly released ephemeral port refuses instead of timing out.
    let probe = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = probe.local_addr().unwrap();
    drop(probe);

    let client_config = ClientConfig {
        blackhole_url: format!("http://{dead_addr}"),
        ..Default::default()
    };
    let (addr, s1, s2) = spawn_pair(ServerConfig::default(), client_config).await;

    let res = common::test_client()
        .get(format!("http://{addr}/reqwest/connect-timeout"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);

    s1.trigger();
    s2.trigger();
}

#[tokio::test]
async fn rest_wait_reports_true_after_release() {
    let server = ServerConfig {
        hold_ms: Some(20),
        ..Default::default()
    };
    let (addr, s1, s2) = spawn_pair(server, ClientConfig::default()).await;

    let res = common::test_client()
        .get(format!("http://{addr}/rest/wait"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "true");

    s1.trigger();
    s2.trigger();
}

#[tokio::test]
async fn rest_bad_surfaces_upstream_400_as_bad_gateway() {
    let (addr, s1, s2) = spawn_pair(ServerConfig::default(), ClientConfig::default()).await;

    let res = common::test_client()
        .get(format!("http://{addr}/rest/bad"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);

    s1.trigger();
    s2.trigger();
}

#[tokio::test]
async fn client_service_healthz_reports_ok() {
    let (addr, s1, s2) = spawn_pair(ServerConfig::default(), ClientConfig::default()).await;

    let res = common::test_client()
        .get(format!("http://{addr}/healthz"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    s1.trigger();
    s2.trigger();
}
