//! # Entity Model
//!
//! The unit of storage in the remote annotated key-value store.
//!
//! An [`Entity`] couples an opaque payload with a block-denominated
//! time-to-live and two tag maps used for filter-based retrieval. The
//! store assigns an [`EntityKey`] on creation, acknowledged through a
//! [`Receipt`]; keys are only ever used for logging, never for lookup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier assigned by the store when an entity is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(pub String);

impl EntityKey {
    /// Creates a new entity key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// String and numeric tag maps attached to an entity.
///
/// Tag names are unique per entity; insertion order is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagSet {
    /// Exact-match string dimensions (ids, identities, rendered booleans).
    pub strings: BTreeMap<String, String>,
    /// Range/exact numeric dimensions (timestamps, totals).
    pub numerics: BTreeMap<String, i64>,
}

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a string tag.
    pub fn push_str(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(name.into(), value.into());
    }

    /// Adds a numeric tag.
    pub fn push_num(&mut self, name: impl Into<String>, value: i64) {
        self.numerics.insert(name.into(), value);
    }

    /// Looks up a string tag.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    /// Looks up a numeric tag.
    #[must_use]
    pub fn get_num(&self, name: &str) -> Option<i64> {
        self.numerics.get(name).copied()
    }
}

/// An entity to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Encoded domain record.
    pub payload: Vec<u8>,
    /// Remaining lifetime in store blocks; the store's only deletion path.
    pub ttl_blocks: u64,
    /// Queryable tags.
    #[serde(flatten)]
    pub tags: TagSet,
}

impl Entity {
    /// Creates an entity from a payload, lifetime, and tag set.
    #[must_use]
    pub fn new(payload: Vec<u8>, ttl_blocks: u64, tags: TagSet) -> Self {
        Self {
            payload,
            ttl_blocks,
            tags,
        }
    }
}

/// A live entity returned by a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEntity {
    /// Store-assigned key.
    pub key: EntityKey,
    /// Encoded domain record.
    pub payload: Vec<u8>,
    /// Tags the entity was stored with.
    #[serde(flatten)]
    pub tags: TagSet,
}

/// Acknowledgement for one created entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Key assigned to the created entity.
    pub entity_key: EntityKey,
}
