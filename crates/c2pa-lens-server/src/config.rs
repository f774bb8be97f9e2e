//! Gateway configuration
//!
//! Read once at start-up from `C2PA_LENS_*` environment variables.

use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

pub const ENV_PORT: &str = "C2PA_LENS_PORT";
pub const ENV_CORE_URL: &str = "C2PA_LENS_CORE_URL";
pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "C2PA_LENS_UPSTREAM_TIMEOUT_SECS";
pub const ENV_MAX_UPLOAD_BYTES: &str = "C2PA_LENS_MAX_UPLOAD_BYTES";
pub const ENV_LOG_LEVEL: &str = "C2PA_LENS_LOG_LEVEL";

/// Error returned when an environment variable holds an unusable value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{key} must be {expected}, got '{value}'")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Base URL of the upstream core API
    pub core_url: String,
    /// Timeout applied to every upstream call
    pub upstream_timeout: Duration,
    /// Largest accepted image upload
    pub max_upload_bytes: usize,
    /// Maximum log level
    pub log_level: Level,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            core_url: "http://localhost:5000".into(),
            upstream_timeout: Duration::from_secs(30),
            max_upload_bytes: 20 * 1024 * 1024,
            log_level: Level::INFO,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unset keys keep their defaults; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_or(&lookup, ENV_PORT, defaults.port, "a valid port number")?;
        let core_url = lookup(ENV_CORE_URL).unwrap_or(defaults.core_url);
        let timeout_secs = parse_or(
            &lookup,
            ENV_UPSTREAM_TIMEOUT_SECS,
            defaults.upstream_timeout.as_secs(),
            "a whole number of seconds",
        )?;
        let max_upload_bytes = parse_or(
            &lookup,
            ENV_MAX_UPLOAD_BYTES,
            defaults.max_upload_bytes,
            "a byte count",
        )?;
        let log_level = parse_or(
            &lookup,
            ENV_LOG_LEVEL,
            defaults.log_level,
            "one of trace|debug|info|warn|error",
        )?;

        if timeout_secs == 0 {
            return Err(ConfigError {
                key: ENV_UPSTREAM_TIMEOUT_SECS,
                value: "0".into(),
                expected: "greater than zero",
            });
        }

        Ok(Self {
            port,
            core_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
            max_upload_bytes,
            log_level,
        })
    }
}

fn parse_or<F, T>(
    lookup: &F,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError {
            key,
            value,
            expected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.core_url, "http://localhost:5000");
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ENV_PORT, "9090"),
            (ENV_CORE_URL, "http://core-api:5000"),
            (ENV_UPSTREAM_TIMEOUT_SECS, "5"),
            (ENV_MAX_UPLOAD_BYTES, "1024"),
            (ENV_LOG_LEVEL, "debug"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.core_url, "http://core-api:5000");
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[(ENV_PORT, "http")])).unwrap_err();

        assert_eq!(err.key, ENV_PORT);
        assert_eq!(err.value, "http");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err =
            ServerConfig::from_lookup(lookup(&[(ENV_UPSTREAM_TIMEOUT_SECS, "0")])).unwrap_err();

        assert_eq!(err.key, ENV_UPSTREAM_TIMEOUT_SECS);
    }
}
