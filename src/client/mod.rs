//! The client service: one route per HTTP client mechanism and timeout
//! configuration, each calling the flaky server.
//!
//! # Route groups
//! ```text
//! /hyper/*    low-level hyper client, shared, built once
//! /rest/*     typed API client over reqwest, shared, built once
//! /reqwest/*  ad-hoc reqwest clients, built per request
//! ```
//!
//! Every route answers a JSON boolean: `true` when the upstream call
//! counts as a success, `false` when a caught timeout stands in for
//! failure. Everything else surfaces through [`UpstreamError`].

pub mod hyper_api;
pub mod reqwest_api;
pub mod rest;

use std::time::Duration;

use axum::body::Body;
use axum::routing::get;
use axum::{Json, Router};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ClientConfig;
use crate::error::UpstreamError;
use crate::observability::{metrics, request_id};
use rest::FlakyApi;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub hyper: Client<HttpConnector, Body>,
    pub rest: FlakyApi,
}

/// HTTP service demonstrating client-side timeout handling.
pub struct ClientService {
    router: Router,
}

impl ClientService {
    /// Create a new service with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let hyper = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let rest = FlakyApi::new(
            &config.server_url,
            config.rest_timeout_ms.map(Duration::from_millis),
        )?;

        let request_timeout = Duration::from_millis(config.request_timeout_ms);
        let state = AppState {
            config,
            hyper,
            rest,
        };

        // The guarded route has no client-side timeout of its own; the
        // route-scoped layer aborts it with a 408.
        let guarded = Router::new()
            .route("/hyper/wait-guarded", get(hyper_api::wait_guarded))
            .route_layer(TimeoutLayer::new(request_timeout));

        let router = Router::new()
            .route("/hyper/mixed", get(hyper_api::mixed))
            .route("/hyper/wait", get(hyper_api::wait))
            .route("/hyper/wait-timeout", get(hyper_api::wait_timeout))
            .merge(guarded)
            .route("/rest/mixed", get(rest::mixed))
            .route("/rest/wait", get(rest::wait))
            .route("/rest/bad", get(rest::bad))
            .route("/reqwest/wait", get(reqwest_api::wait))
            .route("/reqwest/wait-timeout", get(reqwest_api::wait_timeout))
            .route("/reqwest/connect-timeout", get(reqwest_api::connect_timeout))
            .route("/healthz", get(healthz))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(request_id::set_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(request_id::propagate_layer())
                    .layer(axum::middleware::from_fn(metrics::track)),
            );

        Ok(Self { router })
    }

    /// Run the service until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "client service listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("client service stopped");
        Ok(())
    }
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(crate) type CallResult = Result<Json<bool>, UpstreamError>;
