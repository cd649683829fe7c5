//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Check the upstream URL is something the gateway can actually call
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function of the config
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{
    DataServiceConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig,
};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.host must not be empty")]
    EmptyHost,

    #[error("timeouts.{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("timeouts.upstream_secs ({upstream}) must be less than timeouts.request_secs ({request})")]
    UpstreamOutlivesRequest { upstream: u64, request: u64 },

    #[error("upstream.url {url:?} is invalid: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Configurations that can check their own semantics.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<ValidationError>>;
}

impl Validate for DataServiceConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        check_listener(&self.listener, &mut errors);
        check_timeout("request_secs", self.timeouts.request_secs, &mut errors);
        check_observability(&self.observability, &mut errors);
        finish(errors)
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        check_listener(&self.listener, &mut errors);
        check_gateway_timeouts(&self.timeouts, &mut errors);
        check_upstream_url(&self.upstream.url, &mut errors);
        check_observability(&self.observability, &mut errors);
        finish(errors)
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_listener(listener: &ListenerConfig, errors: &mut Vec<ValidationError>) {
    if listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
}

fn check_timeout(field: &'static str, secs: u64, errors: &mut Vec<ValidationError>) {
    if secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field });
    }
}

fn check_gateway_timeouts(timeouts: &TimeoutConfig, errors: &mut Vec<ValidationError>) {
    check_timeout("connect_secs", timeouts.connect_secs, errors);
    check_timeout("upstream_secs", timeouts.upstream_secs, errors);
    check_timeout("request_secs", timeouts.request_secs, errors);

    if timeouts.upstream_secs >= timeouts.request_secs {
        errors.push(ValidationError::UpstreamOutlivesRequest {
            upstream: timeouts.upstream_secs,
            request: timeouts.request_secs,
        });
    }
}

fn check_upstream_url(raw: &str, errors: &mut Vec<ValidationError>) {
    let invalid = |reason: String| ValidationError::InvalidUpstreamUrl {
        url: raw.to_string(),
        reason,
    };

    match Url::parse(raw) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") {
                errors.push(invalid(format!("unsupported scheme {:?}", url.scheme())));
            } else if url.host_str().map_or(true, str::is_empty) {
                errors.push(invalid("missing host".to_string()));
            }
        }
        Err(e) => errors.push(invalid(e.to_string())),
    }
}

fn check_observability(observability: &ObservabilityConfig, errors: &mut Vec<ValidationError>) {
    let level = observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(observability.log_level.clone()));
    }

    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }
}
