//! # Position Repository
//!
//! Typed create/query operations for position records.
//!
//! Positions are append-only, one entity per trade attempt, with a
//! medium [`POSITION_TTL_BLOCKS`] lifetime. Queries support equality
//! filtering by market and by user.

use crate::domain::records::{NewPosition, Position};
use crate::domain::value_objects::RecordKind;
use crate::infrastructure::repositories::{QueryOutcome, RepositoryResult};
use crate::infrastructure::store::client::EntityStore;
use crate::infrastructure::store::entity::{Entity, EntityKey};
use crate::infrastructure::store::error::StoreError;
use crate::infrastructure::store::filter::Filter;
use crate::infrastructure::store::{annotations, codec};
use std::sync::Arc;

/// Time-to-live for position entities, in store blocks.
pub const POSITION_TTL_BLOCKS: u64 = 600;

/// Equality filters for listing positions.
#[derive(Debug, Clone, Default)]
pub struct PositionFilter {
    /// Only positions in this market.
    pub market_id: Option<String>,
    /// Only positions held by this user.
    pub user: Option<String>,
}

/// Repository for position records.
#[derive(Debug, Clone)]
pub struct PositionRepository {
    store: Arc<dyn EntityStore>,
    database_key: Option<String>,
}

impl PositionRepository {
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

    /// Records a position from caller input.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any store call when required
    /// fields are missing, and propagates store errors.
    pub async fn create(&self, new: NewPosition) -> RepositoryResult<(Position, EntityKey)> {
        let position = Position::create(new)?;
        let payload = codec::encode(&position)?;
        let tags = annotations::position_tags(&position, self.database_key.as_deref());

        let receipts = self
            .store
            .create_entities(vec![Entity::new(payload, POSITION_TTL_BLOCKS, tags)])
            .await?;
        let key = receipts
            .into_iter()
            .next()
            .map(|r| r.entity_key)
            .ok_or_else(|| StoreError::write_rejected("no receipt for created position"))?;

        tracing::info!(
            market_id = %position.market_id,
            user = %position.user,
            entity_key = %key,
            "created position"
        );
        Ok((position, key))
    }

    /// Lists positions matching the filter.
    ///
    /// # Errors
    ///
    /// Propagates store errors; an empty match is not an error.
    pub async fn query(&self, filter: PositionFilter) -> RepositoryResult<QueryOutcome<Position>> {
        let mut expr = Filter::kind(RecordKind::Position);
        if let Some(key) = &self.database_key {
            expr = expr.eq_str("databaseKey", key);
        }
        if let Some(market_id) = &filter.market_id {
            expr = expr.eq_str("marketId", market_id);
        }
        if let Some(user) = &filter.user {
            expr = expr.eq_str("user", user);
        }

        let entities = self.store.query_entities(&expr).await?;

        let mut outcome = QueryOutcome::default();
        for entity in entities {
            match codec::decode::<Position>(&entity.payload) {
                Ok(position) => outcome.records.push(position),
                Err(e) => {
                    tracing::warn!(entity_key = %entity.key, error = %e, "skipping malformed position entity");
                    outcome.skipped += 1;
                }
            }
        }
        Ok(outcome)
    }
}
