//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Both services produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Prometheus scrape endpoint (opt-in)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the gateway to the data service in a header
//! - Metrics are cheap when no exporter is installed

pub mod logging;
pub mod metrics;
