//! Routes that build a fresh reqwest client per request.
//!
//! Deliberately wasteful: the point is to show how each timeout knob
//! behaves in isolation, not to pool connections.

use std::time::Duration;

use axum::extract::State;
use axum::Json;

use crate::client::{AppState, CallResult};

/// No timeout: hangs for as long as the upstream holds the request. Any
/// answered status counts as a success; only transport failures error.
pub async fn wait(State(state): State<AppState>) -> CallResult {
    let client = reqwest::Client::builder().build()?;
    let response = client
        .get(format!("{}/wait", state.config.server_url.trim_end_matches('/')))
        .send()
        .await?;
    tracing::info!(status = %response.status(), "upstream /wait answered");

    Ok(Json(true))
}

/// Request timeout: the resulting error is not caught and maps to 504.
pub async fn wait_timeout(State(state): State<AppState>) -> CallResult {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(state.config.request_timeout_ms))
        .build()?;
    client
        .get(format!("{}/wait", state.config.server_url.trim_end_matches('/')))
        .send()
        .await?;

    Ok(Json(true))
}

/// Connect timeout against a blackhole address that never answers.
pub async fn connect_timeout(State(state): State<AppState>) -> CallResult {
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(state.config.connect_timeout_ms))
        .build()?;
    client.get(&state.config.blackhole_url).send().await?;

    Ok(Json(true))
}
