//! Outbound client for the gateway's single upstream.
//!
//! # Responsibilities
//! - Issue exactly one GET per inbound request
//! - Decode the body as arbitrary JSON
//! - Classify failures (transport, status, decode) for logging

use std::time::{Duration, Instant};

use axum::http::HeaderValue;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;

/// Upstream fetch failure. Every variant is reported to the client the same
/// way; the split only matters for logs and metrics.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or body read failure.
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream returned {status} for {url}")]
    Status { status: StatusCode, url: Url },

    /// Body was not valid JSON.
    #[error("upstream returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(e) if e.is_timeout() => "timeout",
            FetchError::Transport(_) => "transport",
            FetchError::Status { .. } => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}

/// Client bound to one upstream URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    url: Url,
}

impl UpstreamClient {
    /// Build the client. Fails only if the TLS backend cannot initialize.
    pub fn new(
        url: Url,
        upstream: &UpstreamConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs));

        if !upstream.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch the upstream document, tagging the call with `request_id`.
    pub async fn fetch(&self, request_id: Option<&HeaderValue>) -> Result<Value, FetchError> {
        let start = Instant::now();
        let result = self.fetch_inner(request_id).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::record_upstream(outcome, start);

        result
    }

    async fn fetch_inner(&self, request_id: Option<&HeaderValue>) -> Result<Value, FetchError> {
        let mut request = self.client.get(self.url.clone());
        if let Some(id) = request_id {
            request = request.header(X_REQUEST_ID, id.clone());
        }

        let response = request.send().await.map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: self.url.clone(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        Ok(serde_json::from_slice(&body)?)
    }
}
