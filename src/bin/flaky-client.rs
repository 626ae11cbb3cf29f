//! The client service calling the flaky server through several HTTP client
//! mechanisms.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use flaky_lab::config::{load_config, AppConfig};
use flaky_lab::observability::{logging, metrics};
use flaky_lab::{lifecycle, ClientService, Shutdown};

#[derive(Parser)]
#[command(name = "flaky-client")]
#[command(about = "HTTP service whose routes call the flaky server with different timeout setups", long_about = None)]
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
        bind_address = %config.client.bind_address,
        server_url = %config.client.server_url,
        request_timeout_ms = config.client.request_timeout_ms,
        connect_timeout_ms = config.client.connect_timeout_ms,
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(error = %e, "failed to parse metrics address"),
        }
    }

    let listener = TcpListener::bind(&config.client.bind_address).await?;

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let service = ClientService::new(config.client)?;
    let handle = tokio::spawn(async move { service.run(listener, rx).await });

    lifecycle::wait_for_signal().await;
    shutdown.trigger();
    handle.await??;

    tracing::info!("shutdown complete");
    Ok(())
}
