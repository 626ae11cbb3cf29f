//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration shared by both lab binaries.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Flaky upstream server settings.
    pub server: ServerConfig,

    /// Client service settings.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Settings for the intentionally unreliable upstream server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Probability that `/mixed` injects a failure, in `[0.0, 1.0]`.
    pub failure_probability: f64,

    /// Upper bound for the random `/mixed` delay in milliseconds.
    pub max_delay_ms: u64,

    /// How long `/wait` holds a request before answering "wokeup", in
    /// milliseconds. Absent means the request is held forever.
    pub hold_ms: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            failure_probability: 0.5,
            max_delay_ms: 500,
            hold_ms: None,
        }
    }
}

/// Settings for the client service and its upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Bind address (e.g., "127.0.0.1:8081").
    pub bind_address: String,

    /// Base URL of the flaky server.
    pub server_url: String,

    /// Request timeout for the timeout-demonstrating routes, in
    /// milliseconds.
    pub request_timeout_ms: u64,

    /// Connect timeout for the connect-timeout route, in milliseconds.
    pub connect_timeout_ms: u64,

    /// Optional request timeout for the typed API client, in milliseconds.
    pub rest_timeout_ms: Option<u64>,

    /// URL that never answers connection attempts, used by the
    /// connect-timeout route.
    pub blackhole_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8081".to_string(),
            server_url: "http://127.0.0.1:8080".to_string(),
            request_timeout_ms: 200,
            connect_timeout_ms: 2200,
            rest_timeout_ms: None,
            // TEST-NET-3 (RFC 5737), reserved and never routed.
            blackhole_url: "http://203.0.113.1:4815".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Metrics exporter bind address. When running both binaries with
    /// metrics enabled, give each its own config file so the addresses
    /// differ.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
