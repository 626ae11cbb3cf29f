//! Typed client for the flaky server's API.

use std::time::Duration;

use axum::extract::State;
use axum::Json;

use crate::client::{AppState, CallResult};
use crate::error::UpstreamError;

/// A typed view of the flaky server: one method per route.
///
/// Built once from configuration and shared through the service state; the
/// optional timeout applies to every call.
#[derive(Clone)]
pub struct FlakyApi {
    http: reqwest::Client,
    base: String,
}

impl FlakyApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn mixed(&self) -> Result<String, UpstreamError> {
        self.get("/mixed").await
    }

    pub async fn wait(&self) -> Result<String, UpstreamError> {
        self.get("/wait").await
    }

    pub async fn bad(&self) -> Result<String, UpstreamError> {
        self.get("/bad").await
    }

    async fn get(&self, path: &str) -> Result<String, UpstreamError> {
        let response = self.http.get(format!("{}{}", self.base, path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }
        Ok(response.text().await?)
    }
}

/// `GET /rest/mixed`
pub async fn mixed(State(state): State<AppState>) -> CallResult {
    state.rest.mixed().await?;
    Ok(Json(true))
}

/// `GET /rest/wait`
pub async fn wait(State(state): State<AppState>) -> CallResult {
    state.rest.wait().await?;
    Ok(Json(true))
}

/// `GET /rest/bad`
pub async fn bad(State(state): State<AppState>) -> CallResult {
    state.rest.bad().await?;
    Ok(Json(true))
}
