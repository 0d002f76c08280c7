//! # Store Errors
//!
//! Error taxonomy for remote store operations.
//!
//! None of these are retried by the adapter; a failed write or query
//! surfaces immediately to the caller, which owns any retry policy.

use thiserror::Error;

/// Error type for entity store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Required configuration is absent; fatal at session-initialization
    /// time and surfaced to every caller until fixed.
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),

    /// The session could not be established or the store is unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The remote store rejected a create batch.
    #[error("write rejected: {0}")]
    WriteRejected(String),

    /// The filter was invalid or the remote store errored during a query.
    #[error("query rejected: {0}")]
    QueryRejected(String),
}

impl StoreError {
    /// Creates a configuration-missing error.
    #[must_use]
    pub fn configuration_missing(msg: impl Into<String>) -> Self {
        Self::ConfigurationMissing(msg.into())
    }

    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Creates a write-rejected error.
    #[must_use]
    pub fn write_rejected(msg: impl Into<String>) -> Self {
        Self::WriteRejected(msg.into())
    }

    /// Creates a query-rejected error.
    #[must_use]
    pub fn query_rejected(msg: impl Into<String>) -> Self {
        Self::QueryRejected(msg.into())
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigurationMissing(_))
    }
}

/// Result type for entity store operations.
pub type StoreResult<T> = Result<T, StoreError>;
