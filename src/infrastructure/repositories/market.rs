//! # Market Repository
//!
//! Typed create/query operations for market records.
//!
//! Markets are the long-lived record kind: entities carry a
//! [`MARKET_TTL_BLOCKS`] lifetime. There is no update path - resolution
//! happens on-chain and is never mirrored back into the store.

use crate::domain::records::{Market, NewMarket};
use crate::domain::value_objects::RecordKind;
use crate::infrastructure::repositories::{QueryOutcome, RepositoryResult};
use crate::infrastructure::store::client::EntityStore;
use crate::infrastructure::store::entity::{Entity, EntityKey};
use crate::infrastructure::store::error::StoreError;
use crate::infrastructure::store::filter::Filter;
use crate::infrastructure::store::{annotations, codec};
use std::sync::Arc;

/// Time-to-live for market entities, in store blocks.
pub const MARKET_TTL_BLOCKS: u64 = 1_000;

/// Equality filters for listing markets.
#[derive(Debug, Clone, Default)]
pub struct MarketFilter {
    /// Only markets not yet resolved.
    pub live: bool,
}

/// Repository for market records.
#[derive(Debug, Clone)]
pub struct MarketRepository {
    store: Arc<dyn EntityStore>,
    database_key: Option<String>,
}

impl MarketRepository {
    /// Creates a repository over a shared store session.
    #[must_use]
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            database_key: None,
        }
    }

    /// Scopes all writes and queries to one logical deployment.
    #[must_use]
    pub fn with_database_key(mut self, key: impl Into<String>) -> Self {
        self.database_key = Some(key.into());
        self
    }

    /// Creates a market from caller input.
    ///
    /// Validates, encodes, annotates, and writes exactly one new entity.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any store call when the input is
    /// incomplete, and propagates store errors - a dropped write must
    /// never be silent.
    pub async fn create(&self, new: NewMarket) -> RepositoryResult<(Market, EntityKey)> {
        let market = Market::create(new)?;
        let payload = codec::encode(&market)?;
        let tags = annotations::market_tags(&market, self.database_key.as_deref());

        let receipts = self
            .store
            .create_entities(vec![Entity::new(payload, MARKET_TTL_BLOCKS, tags)])
            .await?;
        let key = receipts
            .into_iter()
            .next()
            .map(|r| r.entity_key)
            .ok_or_else(|| StoreError::write_rejected("no receipt for created market"))?;

        tracing::info!(market_id = %market.id, entity_key = %key, "created market");
        Ok((market, key))
    }

    /// Lists markets matching the filter.
    ///
    /// Malformed entities are skipped and logged, never allowed to hide
    /// the rest of the result set.
    ///
    /// # Errors
    ///
    /// Propagates store errors; an empty match is not an error.
    pub async fn query(&self, filter: MarketFilter) -> RepositoryResult<QueryOutcome<Market>> {
        let mut expr = Filter::kind(RecordKind::Market);
        if let Some(key) = &self.database_key {
            expr = expr.eq_str("databaseKey", key);
        }
        if filter.live {
            expr = expr.eq_str("isResolved", "false");
        }

        let entities = self.store.query_entities(&expr).await?;

        let mut outcome = QueryOutcome::default();
        for entity in entities {
            match codec::decode::<Market>(&entity.payload) {
                Ok(market) => outcome.records.push(market),
                Err(e) => {
                    tracing::warn!(entity_key = %entity.key, error = %e, "skipping malformed market entity");
                    outcome.skipped += 1;
                }
            }
        }
        Ok(outcome)
    }
}
