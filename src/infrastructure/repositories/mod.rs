//! # Domain Repositories
//!
//! Per-kind facades translating typed create/query calls into
//! entity-level store operations.
//!
//! Each repository validates input eagerly, encodes the record, derives
//! its annotations, attaches the kind's time-to-live, and writes exactly
//! one new entity; nothing is ever mutated or deleted - TTL expiry is the
//! store's only deletion path. Queries are always anchored on the kind's
//! `type` tag (plus the deployment scope when configured) and decode each
//! returned payload, skipping and logging malformed entities rather than
//! failing the whole query.

pub mod event;
pub mod market;
pub mod position;

pub use event::{EventFilter, EventRepository};
pub use market::{MarketFilter, MarketRepository};
pub use position::{PositionFilter, PositionRepository};

use crate::domain::errors::DomainError;
use crate::infrastructure::store::codec::CodecError;
use crate::infrastructure::store::error::StoreError;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Caller input rejected before any store call.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// A record could not be encoded for storage.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The store call itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RepositoryError {
    /// Returns true if this is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// The outcome of a repository query.
///
/// Distinguishes "data", "empty", and "empty because entities were
/// skipped" without conflating any of them with a hard store error
/// (which is a `RepositoryError` instead).
#[derive(Debug, Clone)]
pub struct QueryOutcome<T> {
    /// Successfully decoded records.
    pub records: Vec<T>,
    /// Entities excluded because their payload failed to decode.
    pub skipped: usize,
}

// Manual impl: a derive would demand `T: Default`, which the record
// types neither have nor need here.
impl<T> Default for QueryOutcome<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

impl<T> QueryOutcome<T> {
    /// Returns true if malformed entities were skipped while building
    /// this result.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.skipped > 0
    }
}
