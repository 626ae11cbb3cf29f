//! Routes backed by the low-level hyper client.
//!
//! Requests are built by hand and the response body is discarded; only the
//! status matters. The incoming request ID is forwarded so the upstream's
//! logs line up with ours.

use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::Json;
use hyper::header::USER_AGENT;

use crate::client::{AppState, CallResult};
use crate::error::UpstreamError;
use crate::observability::request_id::X_REQUEST_ID;

fn upstream_request(
    state: &AppState,
    path: &str,
    headers: &HeaderMap,
) -> Result<Request<Body>, UpstreamError> {
    let base = state.config.server_url.trim_end_matches('/');
    let mut builder = Request::builder()
        .method("GET")
        .uri(format!("{base}{path}"))
        .header(USER_AGENT, "flaky-client/hyper");

    if let Some(id) = headers.get(X_REQUEST_ID) {
        builder = builder.header(X_REQUEST_ID, id.clone());
    }

    Ok(builder.body(Body::empty())?)
}

/// Call `/mixed` with no timeout at all.
pub async fn mixed(State(state): State<AppState>, headers: HeaderMap) -> CallResult {
    let request = upstream_request(&state, "/mixed", &headers)?;
    let response = state.hyper.request(request).await?;
    tracing::info!(status = %response.status(), "upstream /mixed answered");

    if response.status().is_success() {
        Ok(Json(true))
    } else {
        Err(UpstreamError::Status(response.status()))
    }
}

/// Call `/wait` with no timeout: hangs for as long as the upstream holds.
pub async fn wait(State(state): State<AppState>, headers: HeaderMap) -> CallResult {
    let request = upstream_request(&state, "/wait", &headers)?;
    let response = state.hyper.request(request).await?;
    tracing::info!(status = %response.status(), "upstream /wait answered");

    if response.status().is_success() {
        Ok(Json(true))
    } else {
        Err(UpstreamError::Status(response.status()))
    }
}

/// Call `/wait` but give up after the configured timeout, reporting `false`
/// instead of an error.
pub async fn wait_timeout(State(state): State<AppState>, headers: HeaderMap) -> CallResult {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    let request = upstream_request(&state, "/wait", &headers)?;

    let response = match tokio::time::timeout(timeout, state.hyper.request(request)).await {
        Ok(outcome) => outcome?,
        Err(_) => {
            tracing::warn!(timeout = ?timeout, "upstream /wait timed out, reporting false");
            return Ok(Json(false));
        }
    };

    tracing::info!(status = %response.status(), "upstream /wait answered");
    if response.status().is_success() {
        Ok(Json(true))
    } else {
        Err(UpstreamError::Status(response.status()))
    }
}

/// Call `/wait` with no client-side timeout; the route's timeout layer is
/// the only thing that aborts the call. An answered request counts as a
/// success regardless of status.
pub async fn wait_guarded(State(state): State<AppState>, headers: HeaderMap) -> CallResult {
    let request = upstream_request(&state, "/wait", &headers)?;
    let response = state.hyper.request(request).await?;
    tracing::info!(status = %response.status(), "upstream /wait answered");

    Ok(Json(true))
}
