use std::path::PathBuf;

use clap::Parser;
use person_relay::config::{resolve_config, GatewayConfig, Overrides};
use person_relay::lifecycle::{serve_gateway, signals, Shutdown};
use person_relay::observability::logging;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "Relays the upstream JSON document over HTTP", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Upstream URL fetched on every request
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = Overrides {
        port: cli.port,
        upstream_url: cli.api_url,
    };
    let config: GatewayConfig = resolve_config(cli.config.as_deref(), &overrides)?;

    logging::init(&config.observability.log_level);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        "gateway starting"
    );

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    signals::forward_to(shutdown);
    serve_gateway(config, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
