//! # Configuration
//!
//! Environment-driven configuration for the store session and the REST
//! server.
//!
//! Values are read from `PREDMARKET_`-prefixed environment variables
//! (loaded from `.env` by the binary via `dotenvy`):
//!
//! - `PREDMARKET_RPC_URL` - remote store endpoint (required)
//! - `PREDMARKET_CHAIN_ID` - store namespace identifier (required)
//! - `PREDMARKET_PRIVATE_KEY` - hex signing key, `0x` prefix optional (required)
//! - `PREDMARKET_DATABASE_KEY` - optional tag scoping queries to one
//!   logical deployment
//! - `PREDMARKET_REQUEST_TIMEOUT_MS` - store call timeout (default 10000)
//! - `PREDMARKET_BIND_ADDR` - REST listen address (default `0.0.0.0:3000`)

use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;

/// Default store call timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Default REST listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Error type for configuration loading.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("missing required configuration: {0}")]
    Missing(&'static str),

    /// A variable is present but unusable.
    #[error("invalid configuration: {name}: {message}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The environment source itself could not be read.
    #[error("configuration source error: {0}")]
    Source(String),
}

impl ConfigError {
    /// Creates an invalid-value error.
    #[must_use]
    pub fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            message: message.into(),
        }
    }
}

/// Raw environment capture before validation.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    rpc_url: Option<String>,
    chain_id: Option<String>,
    private_key: Option<String>,
    database_key: Option<String>,
    request_timeout_ms: Option<String>,
    bind_addr: Option<String>,
}

impl RawConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("PREDMARKET"))
            .build()
            .map_err(|e| ConfigError::Source(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfigError::Source(e.to_string()))
    }
}

/// Connection settings for the remote entity store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Remote store JSON-RPC endpoint.
    pub rpc_url: String,
    /// Store namespace / chain identifier.
    pub chain_id: u64,
    /// Hex signing key without `0x` prefix.
    pub private_key: String,
    /// Optional tag scoping queries to one logical deployment.
    pub database_key: Option<String>,
    /// Store call timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl StoreConfig {
    /// Loads and validates the store configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for absent required variables and
    /// [`ConfigError::Invalid`] for unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_raw(RawConfig::from_env()?)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let rpc_url = raw
            .rpc_url
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("PREDMARKET_RPC_URL"))?;

        let chain_id = raw
            .chain_id
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("PREDMARKET_CHAIN_ID"))?
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::invalid("PREDMARKET_CHAIN_ID", e.to_string()))?;

        let private_key = normalize_private_key(
            &raw.private_key
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing("PREDMARKET_PRIVATE_KEY"))?,
        )?;

        let request_timeout_ms = match raw.request_timeout_ms {
            Some(v) if !v.trim().is_empty() => v
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid("PREDMARKET_REQUEST_TIMEOUT_MS", e.to_string()))?,
            _ => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        Ok(Self {
            rpc_url,
            chain_id,
            private_key,
            database_key: raw.database_key.filter(|v| !v.trim().is_empty()),
            request_timeout_ms,
        })
    }
}

/// Listen settings for the REST server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the REST API binds to.
    pub bind_addr: String,
}

impl ServerConfig {
    /// Loads the server configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Source`] if the environment source cannot be
    /// read.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = RawConfig::from_env()?;
        Ok(Self {
            bind_addr: raw
                .bind_addr
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

fn normalize_private_key(value: &str) -> Result<String, ConfigError> {
    let hex = value.trim().trim_start_matches("0x");
    if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::invalid(
            "PREDMARKET_PRIVATE_KEY",
            "expected 32 bytes of hex",
        ));
    }
    Ok(hex.to_ascii_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn raw_with_required() -> RawConfig {
        RawConfig {
            rpc_url: Some("https://store.example/rpc".into()),
            chain_id: Some("60138453033".into()),
            private_key: Some(format!("0x{}", "ab".repeat(32))),
            database_key: None,
            request_timeout_ms: None,
            bind_addr: None,
        }
    }

    #[test]
    fn valid_config_parses() {
        let cfg = StoreConfig::from_raw(raw_with_required()).unwrap();
        assert_eq!(cfg.chain_id, 60_138_453_033);
        assert_eq!(cfg.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
        assert_eq!(cfg.private_key.len(), 64);
        assert!(cfg.database_key.is_none());
    }

    #[test]
    fn missing_rpc_url_is_reported_by_name() {
        let mut raw = raw_with_required();
        raw.rpc_url = None;
        let err = StoreConfig::from_raw(raw).unwrap_err();
        assert!(err.to_string().contains("PREDMARKET_RPC_URL"));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let mut raw = raw_with_required();
        raw.private_key = Some("   ".into());
        assert!(StoreConfig::from_raw(raw).is_err());
    }

    #[test]
    fn private_key_prefix_is_stripped() {
        let cfg = StoreConfig::from_raw(raw_with_required()).unwrap();
        assert!(!cfg.private_key.starts_with("0x"));
    }

    #[test]
    fn short_private_key_is_invalid() {
        let mut raw = raw_with_required();
        raw.private_key = Some("0xabcd".into());
        let err = StoreConfig::from_raw(raw).unwrap_err();
        assert!(err.to_string().contains("PRIVATE_KEY"));
    }

    #[test]
    fn bad_chain_id_is_invalid() {
        let mut raw = raw_with_required();
        raw.chain_id = Some("not-a-number".into());
        assert!(StoreConfig::from_raw(raw).is_err());
    }
}
