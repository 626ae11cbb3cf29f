//! The intentionally unreliable upstream server.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use flaky_lab::config::{load_config, AppConfig};
use flaky_lab::observability::{logging, metrics};
use flaky_lab::{lifecycle, FlakyServer, Shutdown};

#[derive(Parser)]
#[command(name = "flaky-server")]
#[command(about = "HTTP server that randomly fails, delays, or hangs", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.server.bind_address,
        failure_probability = config.server.failure_probability,
        max_delay_ms = config.server.max_delay_ms,
        hold_ms = ?config.server.hold_ms,
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(error = %e, "failed to parse metrics address"),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = FlakyServer::new(config.server);
    let handle = tokio::spawn(async move { server.run(listener, rx).await });

    lifecycle::wait_for_signal().await;
    shutdown.trigger();
    handle.await??;

    tracing::info!("shutdown complete");
    Ok(())
}
