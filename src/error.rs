//! Errors for calls made against the flaky upstream.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure of an upstream call made by the client service.
///
/// Status mapping: a non-success upstream answer and transport failures
/// surface as 502 Bad Gateway; a client-side timeout surfaces as 504
/// Gateway Timeout.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-success status.
    #[error("upstream answered {0}")]
    Status(StatusCode),

    /// The request never completed (connection, protocol, or timeout).
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Same, for the low-level hyper client.
    #[error("upstream request failed: {0}")]
    Client(#[from] hyper_util::client::legacy::Error),

    /// The outgoing request could not be built.
    #[error("invalid upstream request: {0}")]
    Request(#[from] axum::http::Error),
}

impl UpstreamError {
    fn status_code(&self) -> StatusCode {
        match self {
            UpstreamError::Http(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "upstream call failed");
        (self.status_code(), self.to_string()).into_response()
    }
}
