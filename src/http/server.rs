//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap a service's routes with the shared middleware stack
//!   (request ID, tracing, timeout, metrics)
//! - Bind the server to a listener
//! - Drain connections on shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{DataServiceConfig, GatewayConfig};
use crate::gateway::{GatewayState, UpstreamClient};
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::shutdown;
use crate::lifecycle::startup::StartupError;
use crate::observability::metrics;
use crate::{data, gateway};

/// Service label for the data service in logs and metrics.
pub const DATA_SERVICE: &str = "data-service";

/// Service label for the gateway in logs and metrics.
pub const GATEWAY: &str = "gateway";

/// HTTP server for one of the two services.
pub struct HttpServer {
    service: &'static str,
    router: Router,
}

impl HttpServer {
    /// Server for the data service.
    pub fn data_service(config: &DataServiceConfig) -> Self {
        Self::new(DATA_SERVICE, data::router(), config.timeouts.request_secs)
    }

    /// Server for the gateway. Fails if the upstream URL does not parse or
    /// the outbound client cannot be built.
    pub fn gateway(config: &GatewayConfig) -> Result<Self, StartupError> {
        let url = config.upstream_url()?;
        let upstream = UpstreamClient::new(url, &config.upstream, &config.timeouts)?;

        let state = GatewayState {
            upstream: Arc::new(upstream),
            expose_error_details: config.upstream.expose_error_details,
        };

        Ok(Self::new(
            GATEWAY,
            gateway::router(state),
            config.timeouts.request_secs,
        ))
    }

    fn new(service: &'static str, routes: Router, request_secs: u64) -> Self {
        let router = Self::build_router(service, routes, request_secs);
        Self { service, router }
    }

    /// Layer the middleware stack. The last layer added runs first, so the
    /// request ID exists before the trace span opens.
    #[allow(deprecated)]
    fn build_router(service: &'static str, routes: Router, request_secs: u64) -> Router {
        routes
            .layer(middleware::from_fn_with_state(service, track_requests))
            .layer(TimeoutLayer::new(Duration::from_secs(request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Fully layered router, for driving the service in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown_rx` fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            service = self.service,
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!(service = self.service, "HTTP server stopped");
        Ok(())
    }
}

async fn track_requests(
    State(service): State<&'static str>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();

    let response = next.run(request).await;

    metrics::record_request(service, method.as_str(), response.status().as_u16(), start);
    response
}
