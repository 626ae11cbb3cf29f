//! The intentionally unreliable upstream service.
//!
//! # Routes
//! - `GET /mixed`: random failure or random delay, then "Hello World"
//! - `GET /wait`: holds the request; forever unless a hold is configured
//! - `GET /bad`: always 400
//! - `GET /healthz`: liveness probe
//!
//! The router deliberately carries no request-timeout layer: a global
//! timeout would release `/wait` and defeat the demonstration.

mod chaos;

use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::observability::{metrics, request_id};

/// The flaky upstream server.
pub struct FlakyServer {
    router: Router,
}

#[derive(Clone)]
struct AppState {
    config: ServerConfig,
}

impl FlakyServer {
    /// Create a new server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState { config };

        let router = Router::new()
            .route("/mixed", get(mixed))
            .route("/wait", get(wait))
            .route("/bad", get(bad))
            .route("/healthz", get(healthz))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(request_id::set_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(request_id::propagate_layer())
                    .layer(axum::middleware::from_fn(metrics::track)),
            );

        Self { router }
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "flaky server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("flaky server stopped");
        Ok(())
    }
}

/// Fails with the configured probability; otherwise delays a random amount
/// and greets.
async fn mixed(State(state): State<AppState>) -> Response {
    if chaos::flip(state.config.failure_probability) {
        tracing::error!("injecting failure on /mixed");
        return (StatusCode::INTERNAL_SERVER_ERROR, "injected failure").into_response();
    }

    let delay = chaos::delay_below(state.config.max_delay_ms);
    tracing::debug!(delay = ?delay, "delaying /mixed response");
    tokio::time::sleep(delay).await;

    "Hello World".into_response()
}

/// Holds the request for the configured duration, or forever when none is
/// configured.
async fn wait(State(state): State<AppState>) -> &'static str {
    match state.config.hold_ms {
        Some(ms) => tokio::time::sleep(Duration::from_millis(ms)).await,
        // The deadline saturates; this sleep never completes.
        None => tokio::time::sleep(Duration::from_secs(u64::MAX)).await,
    }

    "wokeup"
}

async fn bad() -> StatusCode {
    StatusCode::BAD_REQUEST
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

async fn healthz() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
