//! Gateway: relays the upstream JSON document or a translated error.
//!
//! # Data Flow
//! ```text
//! GET /
//!     → relay (request ID read from headers)
//!     → upstream.rs (single GET, no retries)
//!     → 200 + upstream JSON, unmodified
//!     → or 500 + {"error": "<description>"}
//! ```

pub mod upstream;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::http::request::{request_id, X_REQUEST_ID};
use crate::http::response::{describe, error_response};

pub use upstream::{FetchError, UpstreamClient};

/// Message sent to clients when error details are withheld.
pub const GENERIC_FAILURE: &str = "upstream request failed";

/// Handler state. Immutable and shared across requests.
#[derive(Debug, Clone)]
pub struct GatewayState {
    pub upstream: Arc<UpstreamClient>,
    pub expose_error_details: bool,
}

/// Routes owned by the gateway.
pub fn router(state: GatewayState) -> Router {
    Router::new().route("/", get(relay)).with_state(state)
}

async fn relay(State(state): State<GatewayState>, headers: HeaderMap) -> Response {
    let request_id = request_id(&headers);

    tracing::debug!(
        request_id = %request_id,
        upstream = %state.upstream.url(),
        "Fetching upstream"
    );

    match state.upstream.fetch(headers.get(X_REQUEST_ID)).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            let description = describe(&e);
            tracing::error!(
                request_id = %request_id,
                kind = e.kind(),
                error = %description,
                "Upstream fetch failed"
            );

            let message = if state.expose_error_details {
                description
            } else {
                GENERIC_FAILURE.to_string()
            };
            error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}
