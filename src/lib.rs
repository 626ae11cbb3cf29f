//! Flaky HTTP lab.
//!
//! Two small services for demonstrating client-side timeout and
//! fault-tolerance behavior:
//!
//! - [`FlakyServer`] exposes routes that randomly fail, randomly delay, or
//!   hang indefinitely (`flaky-server` binary).
//! - [`ClientService`] exposes one route per HTTP client mechanism and
//!   timeout configuration, each calling the flaky server to show how that
//!   mechanism behaves against a slow or failing upstream (`flaky-client`
//!   binary).

pub mod client;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod server;

pub use client::ClientService;
pub use config::AppConfig;
pub use lifecycle::Shutdown;
pub use server::FlakyServer;
