//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`, initialized once per binary
//! - A UUID request ID is stamped at the edge, echoed on responses, and
//!   forwarded to upstream calls so one ID ties a client-service route to
//!   the flaky-server request it triggered
//! - Metrics are cheap (a counter and a histogram per request); the
//!   Prometheus exporter only starts when enabled in config

pub mod logging;
pub mod metrics;
pub mod request_id;
