use std::path::PathBuf;

use clap::Parser;
use person_relay::config::{resolve_config, DataServiceConfig, Overrides};
use person_relay::lifecycle::{serve_data_service, signals, Shutdown};
use person_relay::observability::logging;

#[derive(Parser)]
#[command(name = "data-service")]
#[command(about = "Serves the person record over HTTP", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "DATA_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = Overrides {
        port: cli.port,
        upstream_url: None,
    };
    let config: DataServiceConfig = resolve_config(cli.config.as_deref(), &overrides)?;

    logging::init(&config.observability.log_level);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        "data-service starting"
    );

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    signals::forward_to(shutdown);
    serve_data_service(config, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
