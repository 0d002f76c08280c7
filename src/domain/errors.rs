//! # Domain Errors
//!
//! Error types for domain-level validation.
//!
//! Validation happens eagerly when a record is constructed from caller
//! input, before any store call is attempted. A record that reaches the
//! adapter is always well-formed.

use thiserror::Error;

/// Error type for domain validation failures.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller-supplied record is missing a required field or carries an
    /// out-of-range value.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = DomainError::validation("amount is required");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "validation failed: amount is required");
    }
}
