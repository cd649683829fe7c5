//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): inbound requests by service, method, status
//! - `relay_request_duration_seconds` (histogram): inbound latency by service
//! - `relay_upstream_requests_total` (counter): gateway fetches by outcome
//! - `relay_upstream_duration_seconds` (histogram): gateway fetch latency
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one inbound request.
pub fn record_request(service: &'static str, method: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "relay_requests_total",
        "service" => service,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    ::metrics::histogram!("relay_request_duration_seconds", "service" => service)
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream fetch made by the gateway.
pub fn record_upstream(outcome: &'static str, start: Instant) {
    ::metrics::counter!("relay_upstream_requests_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("relay_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}
