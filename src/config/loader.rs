//! Configuration loading from disk and command-line overrides.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::schema::{DataServiceConfig, GatewayConfig};
use crate::config::validation::{Validate, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values supplied on the command line or through the environment.
/// Anything set here wins over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub upstream_url: Option<String>,
}

/// Settings that accept [`Overrides`].
pub trait Overridable {
    fn apply(&mut self, overrides: &Overrides);
}

impl Overridable for DataServiceConfig {
    fn apply(&mut self, overrides: &Overrides) {
        if let Some(port) = overrides.port {
            self.listener.port = port;
        }
    }
}

impl Overridable for GatewayConfig {
    fn apply(&mut self, overrides: &Overrides) {
        if let Some(port) = overrides.port {
            self.listener.port = port;
        }
        if let Some(url) = &overrides.upstream_url {
            self.upstream.url = url.clone();
        }
    }
}

/// Parse a TOML document without validating it.
pub fn parse_config<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Resolve the effective configuration: defaults, then the optional file,
/// then overrides. The result is validated before it is returned.
pub fn resolve_config<T>(path: Option<&Path>, overrides: &Overrides) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default + Validate + Overridable,
{
    let mut config: T = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => T::default(),
    };

    config.apply(overrides);
    config.validate().map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: GatewayConfig = parse_config(
            r#"
            [upstream]
            url = "http://data:8000/"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.url, "http://data:8000/");
        assert!(config.upstream.expose_error_details);
        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.timeouts.upstream_secs, 10);
    }

    #[test]
    fn overrides_win_over_file() {
        let path = scratch_file(
            "gateway-overrides",
            r#"
            [listener]
            port = 9000

            [upstream]
            url = "http://from-file:8000/"
            "#,
        );

        let overrides = Overrides {
            port: Some(9500),
            upstream_url: Some("http://from-env:8000/".into()),
        };
        let config: GatewayConfig = resolve_config(Some(&path), &overrides).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.listener.port, 9500);
        assert_eq!(config.upstream.url, "http://from-env:8000/");
    }

    #[test]
    fn no_file_means_defaults() {
        let config: DataServiceConfig = resolve_config(None, &Overrides::default()).unwrap();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn data_service_ignores_upstream_override() {
        let overrides = Overrides {
            port: Some(8001),
            upstream_url: Some("::not-a-url::".into()),
        };
        let config: DataServiceConfig = resolve_config(None, &overrides).unwrap();
        assert_eq!(config.listener.port, 8001);
    }

    #[test]
    fn invalid_override_fails_validation() {
        let overrides = Overrides {
            port: None,
            upstream_url: Some("localhost".into()),
        };
        let err = resolve_config::<GatewayConfig>(None, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().starts_with("Validation failed: upstream.url"));
    }

    #[test]
    fn data_service_rejects_upstream_timeouts() {
        let err = parse_config::<DataServiceConfig>(
            r#"
            [timeouts]
            request_secs = 5
            upstream_secs = 3
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("upstream_secs"));

        let config: DataServiceConfig = parse_config("[timeouts]\nrequest_secs = 5\n").unwrap();
        assert_eq!(config.timeouts.request_secs, 5);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse_config::<GatewayConfig>("[listener\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = Path::new("/definitely/not/here/gateway.toml");
        let err = resolve_config::<GatewayConfig>(Some(path), &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
