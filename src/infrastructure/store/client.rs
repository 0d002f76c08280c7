//! # Entity Store Port
//!
//! Port definition for the remote annotated key-value store.
//!
//! Implementations:
//!
//! - [`RpcEntityStore`](crate::infrastructure::store::rpc::RpcEntityStore):
//!   JSON-RPC client for the hosted store
//! - [`InMemoryEntityStore`](crate::infrastructure::store::in_memory::InMemoryEntityStore):
//!   TTL-aware map for tests
//!
//! # Examples
//!
//! ```ignore
//! use predmarket_store::infrastructure::store::client::EntityStore;
//!
//! async fn count_live(store: &impl EntityStore, filter: &Filter) -> usize {
//!     store.query_entities(filter).await.map(|e| e.len()).unwrap_or(0)
//! }
//! ```

use crate::infrastructure::store::entity::{Entity, Receipt, StoredEntity};
use crate::infrastructure::store::error::StoreResult;
use crate::infrastructure::store::filter::Filter;
use async_trait::async_trait;
use std::fmt;

/// Trait for annotated entity store operations.
///
/// Every call is independent and stateless; implementations must be safe
/// to share behind an `Arc` across concurrent callers.
#[async_trait]
pub trait EntityStore: Send + Sync + fmt::Debug {
    /// Submits one or more entities for creation.
    ///
    /// Each entity is independently acknowledged by a receipt carrying its
    /// assigned key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`](crate::infrastructure::store::error::StoreError)
    /// if the store cannot be reached and `WriteRejected` if the remote
    /// store rejects the batch.
    async fn create_entities(&self, entities: Vec<Entity>) -> StoreResult<Vec<Receipt>>;

    /// Evaluates a filter against all live (non-expired) entities.
    ///
    /// Returns an empty vector, never an error, when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `QueryRejected` if the filter is invalid or the remote
    /// store errors.
    async fn query_entities(&self, filter: &Filter) -> StoreResult<Vec<StoredEntity>>;
}
