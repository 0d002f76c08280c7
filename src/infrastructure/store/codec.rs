//! # Entity Codec
//!
//! Serializes domain records to and from opaque entity payloads.
//!
//! Payloads are UTF-8 JSON text. Decoding is all-or-nothing: either every
//! required field is present and correctly typed, or the whole call fails
//! with [`CodecError::MalformedPayload`]. Big-integer fields round-trip as
//! exact decimal strings and are never coerced through floating point.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Error type for codec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The payload bytes are not valid encoded text or do not parse into
    /// the expected record shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The record could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl CodecError {
    /// Creates a malformed payload error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }

    /// Returns true if this is a malformed payload error.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedPayload(_))
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Encodes a record into an opaque payload.
///
/// # Errors
///
/// Returns [`CodecError::Serialization`] if the record cannot be
/// serialized (e.g. a map with non-string keys in event data).
pub fn encode<T: Serialize>(record: &T) -> CodecResult<Vec<u8>> {
    serde_json::to_vec(record).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes an opaque payload back into a record.
///
/// # Errors
///
/// Returns [`CodecError::MalformedPayload`] if the bytes are not valid
/// JSON text or do not match the record shape. No partial decoding.
pub fn decode<T: DeserializeOwned>(payload: &[u8]) -> CodecResult<T> {
    serde_json::from_slice(payload).map_err(|e| CodecError::malformed(e.to_string()))
}
