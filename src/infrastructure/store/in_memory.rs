//! # In-Memory Entity Store
//!
//! In-memory implementation of [`EntityStore`] for testing.
//!
//! Uses a thread-safe map with a logical block counter so TTL expiry can
//! be driven deterministically: [`InMemoryEntityStore::advance_blocks`]
//! moves the clock forward and expired entities stop matching queries.

use crate::infrastructure::store::client::EntityStore;
use crate::infrastructure::store::entity::{Entity, EntityKey, Receipt, StoredEntity};
use crate::infrastructure::store::error::StoreResult;
use crate::infrastructure::store::filter::Filter;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug)]
struct HeldEntity {
    entity: Entity,
    expires_at_block: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entities: HashMap<EntityKey, HeldEntity>,
    current_block: u64,
}

/// In-memory implementation of [`EntityStore`].
///
/// Suitable for unit tests without a remote store. Cloning shares the
/// underlying storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntityStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryEntityStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the logical block counter, expiring entities whose TTL
    /// has elapsed.
    pub async fn advance_blocks(&self, blocks: u64) {
        let mut inner = self.inner.write().await;
        inner.current_block += blocks;
    }

    /// Returns the number of stored entities, live or expired.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .try_read()
            .map(|guard| guard.entities.len())
            .unwrap_or(0)
    }

    /// Returns true if the store holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all entities and resets the block counter.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.entities.clear();
        inner.current_block = 0;
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn create_entities(&self, entities: Vec<Entity>) -> StoreResult<Vec<Receipt>> {
        let mut inner = self.inner.write().await;
        let current = inner.current_block;

        let mut receipts = Vec::with_capacity(entities.len());
        for entity in entities {
            let key = EntityKey::new(format!("0x{}", Uuid::new_v4().simple()));
            let expires_at_block = current.saturating_add(entity.ttl_blocks);
            inner.entities.insert(
                key.clone(),
                HeldEntity {
                    entity,
                    expires_at_block,
                },
            );
            receipts.push(Receipt { entity_key: key });
        }
        Ok(receipts)
    }

    async fn query_entities(&self, filter: &Filter) -> StoreResult<Vec<StoredEntity>> {
        let inner = self.inner.read().await;
        let current = inner.current_block;

        let matches = inner
            .entities
            .iter()
            .filter(|(_, held)| held.expires_at_block > current)
            .filter(|(_, held)| filter.matches(&held.entity.tags))
            .map(|(key, held)| StoredEntity {
                key: key.clone(),
                payload: held.entity.payload.clone(),
                tags: held.entity.tags.clone(),
            })
            .collect();
        Ok(matches)
    }
}
