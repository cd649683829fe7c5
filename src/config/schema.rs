//! Configuration schema definitions.
//!
//! One root type per service. All types derive Serde traits for
//! deserialization from TOML files, and every field has a default so a
//! missing file (or a partial one) still yields a runnable service.

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration for the data service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataServiceConfig {
    /// Listener configuration (host and port).
    pub listener: ListenerConfig,

    /// Inbound request deadline.
    pub timeouts: InboundTimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for DataServiceConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::with_port(8000),
            timeouts: InboundTimeoutConfig::default(),
            observability: ObservabilityConfig::with_metrics_address("0.0.0.0:9100"),
        }
    }
}

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (host and port).
    pub listener: ListenerConfig,

    /// Upstream the gateway relays to.
    pub upstream: UpstreamConfig,

    /// Inbound and outbound timeouts.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::with_port(8080),
            upstream: UpstreamConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::with_metrics_address("0.0.0.0:9101"),
        }
    }
}

impl GatewayConfig {
    /// Parse the configured upstream URL.
    pub fn upstream_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.upstream.url)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Zero asks the OS for an ephemeral port.
    pub port: u16,
}

impl ListenerConfig {
    fn with_port(port: u16) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port,
        }
    }

    /// Address string accepted by `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self::with_port(8080)
    }
}

/// Upstream configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Absolute URL fetched on every inbound request, used as-is.
    pub url: String,

    /// Relay the failure description to clients. When false, clients get a
    /// generic message and the details only reach the logs.
    pub expose_error_details: bool,

    /// Honor HTTP_PROXY/HTTPS_PROXY for the outbound call.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/".to_string(),
            expose_error_details: true,
            use_system_proxy: false,
        }
    }
}

/// Timeout configuration for a service that makes no outbound calls.
/// Upstream settings are rejected rather than ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InboundTimeoutConfig {
    /// Inbound request timeout in seconds.
    pub request_secs: u64,
}

impl Default for InboundTimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Gateway timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Upstream request timeout (connect + response + body) in seconds.
    /// Must stay below `request_secs` so a slow upstream surfaces as a
    /// fetch failure instead of an inbound timeout.
    pub upstream_secs: u64,

    /// Inbound request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 10,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl ObservabilityConfig {
    fn with_metrics_address(addr: &str) -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: addr.to_string(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::with_metrics_address("0.0.0.0:9100")
    }
}
