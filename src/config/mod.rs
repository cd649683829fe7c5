//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → config file (TOML, optional) via loader.rs
//!     → command-line / environment overrides (PORT, API_URL)
//!     → validation.rs (semantic checks)
//!     → DataServiceConfig / GatewayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{resolve_config, ConfigError, Overrides};
pub use schema::{
    DataServiceConfig, GatewayConfig, InboundTimeoutConfig, ListenerConfig, ObservabilityConfig,
    TimeoutConfig, UpstreamConfig,
};
pub use validation::{Validate, ValidationError};
