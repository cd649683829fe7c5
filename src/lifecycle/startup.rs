//! Startup orchestration.
//!
//! # Responsibilities
//! - Install the metrics exporter when enabled
//! - Build the service and bind its listener
//! - Serve until the shutdown coordinator fires
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when ready)

use std::net::SocketAddr;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::{ConfigError, DataServiceConfig, GatewayConfig, ListenerConfig, ObservabilityConfig};
use crate::http::HttpServer;
use crate::observability::metrics;

/// Errors that abort a service before or while it serves.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid upstream URL: {0}")]
    UpstreamUrl(#[from] url::ParseError),

    #[error("failed to build upstream client: {0}")]
    UpstreamClient(#[from] reqwest::Error),

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the data service until `shutdown_rx` fires.
///
/// Subscribe before installing signal handlers: a signal that arrives while
/// the service is still starting is then already queued on `shutdown_rx`.
pub async fn serve_data_service(
    config: DataServiceConfig,
    shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    start_metrics(&config.observability)?;
    let server = HttpServer::data_service(&config);
    serve(server, &config.listener, shutdown_rx).await
}

/// Run the gateway until `shutdown_rx` fires.
pub async fn serve_gateway(
    config: GatewayConfig,
    shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    start_metrics(&config.observability)?;
    let server = HttpServer::gateway(&config)?;

    tracing::info!(
        upstream = %config.upstream.url,
        connect_timeout_secs = config.timeouts.connect_secs,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Upstream configured"
    );

    serve(server, &config.listener, shutdown_rx).await
}

async fn serve(
    server: HttpServer,
    listener_config: &ListenerConfig,
    shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    let listener = TcpListener::bind(listener_config.bind_address()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        service = server.service(),
        address = %local_addr,
        "Listening for connections"
    );

    server.run(listener, shutdown_rx).await?;
    Ok(())
}

fn start_metrics(config: &ObservabilityConfig) -> Result<(), StartupError> {
    if !config.metrics_enabled {
        return Ok(());
    }

    let addr: SocketAddr = config
        .metrics_address
        .parse()
        .map_err(|_| StartupError::MetricsAddress(config.metrics_address.clone()))?;
    metrics::init_metrics(addr)?;
    Ok(())
}
