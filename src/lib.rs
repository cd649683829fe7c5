//! Person record data service and the gateway that relays it.
//!
//! ```text
//!   client ──GET /──▶ gateway ──GET upstream.url──▶ data-service
//!          ◀─200 JSON / 500 {"error"}─┘ ◀──200 Person JSON──┘
//! ```

// Services
pub mod data;
pub mod gateway;

// Shared plumbing
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::{DataServiceConfig, GatewayConfig};
pub use data::Person;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
