//! # Annotated Entity Store Adapter
//!
//! Everything needed to persist domain records in the remote annotated
//! key-value store:
//!
//! - [`entity`]: the stored unit (payload + TTL + tag maps)
//! - [`codec`]: payload serialization, all-or-nothing decoding
//! - [`annotations`]: per-kind derivation of queryable tags
//! - [`filter`]: structured filter expressions with an escaped renderer
//! - [`client`]: the [`EntityStore`](client::EntityStore) port
//! - [`rpc`]: JSON-RPC implementation for the hosted store
//! - [`in_memory`]: TTL-aware test implementation
//! - [`session`]: once-initialized shared session handle

pub mod annotations;
pub mod client;
pub mod codec;
pub mod entity;
pub mod error;
pub mod filter;
pub mod in_memory;
pub mod rpc;
pub mod session;

pub use client::EntityStore;
pub use entity::{Entity, EntityKey, Receipt, StoredEntity, TagSet};
pub use error::{StoreError, StoreResult};
pub use filter::{Filter, NumOp};
pub use session::SharedStore;
