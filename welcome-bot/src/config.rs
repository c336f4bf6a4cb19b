//! Configuration module for environment variable parsing.
//!
//! The bot token and signing secret are required; everything else has a
//! default. Startup fails with [`ConfigError`] when a required value is absent.

use std::env;
use std::fmt;

use thiserror::Error;
use tracing::warn;
use url::Url;

/// Default Pachca API base URL.
pub const DEFAULT_API_URL: &str = "https://api.pachca.com/api/shared/v1";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default freshness window for webhook timestamps, in seconds.
pub const DEFAULT_MAX_AGE_SECS: u64 = 60;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("invalid URL in {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Bearer access token of the bot
    pub pachca_token: String,

    /// Signing secret of the outgoing webhook
    pub signing_secret: String,

    /// Port for the web server to listen on
    pub port: u16,

    /// Base URL of the Pachca REST API
    pub api_base_url: Url,

    /// Maximum allowed drift in seconds between webhook send time and receipt
    pub webhook_max_age: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("pachca_token", &"<redacted>")
            .field("signing_secret", &"<redacted>")
            .field("port", &self.port)
            .field("api_base_url", &self.api_base_url.as_str())
            .field("webhook_max_age", &self.webhook_max_age)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values are treated the same as unset ones
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let pachca_token = get("PACHCA_TOKEN").ok_or(ConfigError::Missing("PACHCA_TOKEN"))?;
        let signing_secret = get("PACHCA_SIGNING_SECRET")
            .ok_or(ConfigError::Missing("PACHCA_SIGNING_SECRET"))?;

        let raw_url = get("PACHCA_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base_url = Url::parse(raw_url.trim()).map_err(|source| ConfigError::InvalidUrl {
            name: "PACHCA_API_URL",
            source,
        })?;

        Ok(Config {
            pachca_token,
            signing_secret,
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT),
            api_base_url,
            webhook_max_age: parse_or("WEBHOOK_MAX_AGE", get("WEBHOOK_MAX_AGE"), DEFAULT_MAX_AGE_SECS),
        })
    }
}

/// Parse an optional numeric variable, falling back to the default on garbage.
fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
{
    let raw = match raw {
        Some(v) => v,
        None => return default,
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid numeric value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_required_values_and_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("PACHCA_TOKEN", "token"),
            ("PACHCA_SIGNING_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.pachca_token, "token");
        assert_eq!(config.signing_secret, "secret");
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_base_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.webhook_max_age, 60);
    }

    #[test]
    fn test_missing_token() {
        let err = Config::from_lookup(lookup(&[("PACHCA_SIGNING_SECRET", "secret")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("PACHCA_TOKEN")));
    }

    #[test]
    fn test_empty_secret_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("PACHCA_TOKEN", "token"),
            ("PACHCA_SIGNING_SECRET", "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("PACHCA_SIGNING_SECRET")));
        assert_eq!(err.to_string(), "environment variable PACHCA_SIGNING_SECRET must be set");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PACHCA_TOKEN", "token"),
            ("PACHCA_SIGNING_SECRET", "secret"),
            ("PORT", "8081"),
            ("PACHCA_API_URL", "http://localhost:9000/api"),
            ("WEBHOOK_MAX_AGE", "120"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8081);
        assert_eq!(config.api_base_url.as_str(), "http://localhost:9000/api");
        assert_eq!(config.webhook_max_age, 120);
    }

    #[test]
    fn test_invalid_port_uses_default() {
        let config = Config::from_lookup(lookup(&[
            ("PACHCA_TOKEN", "token"),
            ("PACHCA_SIGNING_SECRET", "secret"),
            ("PORT", "not-a-port"),
        ]))
        .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_api_url() {
        let err = Config::from_lookup(lookup(&[
            ("PACHCA_TOKEN", "token"),
            ("PACHCA_SIGNING_SECRET", "secret"),
            ("PACHCA_API_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::from_lookup(lookup(&[
            ("PACHCA_TOKEN", "super-token"),
            ("PACHCA_SIGNING_SECRET", "super-secret"),
        ]))
        .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-token"));
        assert!(!rendered.contains("super-secret"));
    }
}
