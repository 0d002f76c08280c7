//! # Event Repository
//!
//! Typed create/query operations for activity-feed events.
//!
//! Events are the shortest-lived kind ([`EVENT_TTL_BLOCKS`]): a transient
//! feed, not a ledger of record. Queries support equality filtering by
//! event type, market, and user; no code path reads an individual event
//! by key.

use crate::domain::records::{Event, NewEvent};
use crate::domain::value_objects::RecordKind;
use crate::infrastructure::repositories::{QueryOutcome, RepositoryResult};
use crate::infrastructure::store::client::EntityStore;
use crate::infrastructure::store::entity::{Entity, EntityKey};
use crate::infrastructure::store::error::StoreError;
use crate::infrastructure::store::filter::Filter;
use crate::infrastructure::store::{annotations, codec};
use std::sync::Arc;

/// Time-to-live for event entities, in store blocks.
pub const EVENT_TTL_BLOCKS: u64 = 300;

/// Equality filters for listing events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Only events of this type.
    pub event_type: Option<String>,
    /// Only events referencing this market.
    pub market_id: Option<String>,
    /// Only events attributed to this user.
    pub user: Option<String>,
}

/// Repository for activity-feed events.
#[derive(Debug, Clone)]
pub struct EventRepository {
    store: Arc<dyn EntityStore>,
    database_key: Option<String>,
}

impl EventRepository {
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

    /// Appends an event to the activity feed.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any store call when the event
    /// type is missing, and propagates store errors.
    pub async fn create(&self, new: NewEvent) -> RepositoryResult<(Event, EntityKey)> {
        let event = Event::create(new)?;
        let payload = codec::encode(&event)?;
        let tags = annotations::event_tags(&event, self.database_key.as_deref());

        let receipts = self
            .store
            .create_entities(vec![Entity::new(payload, EVENT_TTL_BLOCKS, tags)])
            .await?;
        let key = receipts
            .into_iter()
            .next()
            .map(|r| r.entity_key)
            .ok_or_else(|| StoreError::write_rejected("no receipt for created event"))?;

        tracing::info!(event_type = %event.event_type, entity_key = %key, "wrote event");
        Ok((event, key))
    }

    /// Lists events matching the filter.
    ///
    /// # Errors
    ///
    /// Propagates store errors; an empty match is not an error.
    pub async fn query(&self, filter: EventFilter) -> RepositoryResult<QueryOutcome<Event>> {
        let mut expr = Filter::kind(RecordKind::Event);
        if let Some(key) = &self.database_key {
            expr = expr.eq_str("databaseKey", key);
        }
        if let Some(event_type) = &filter.event_type {
            expr = expr.eq_str("eventType", event_type);
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
            match codec::decode::<Event>(&entity.payload) {
                Ok(event) => outcome.records.push(event),
                Err(e) => {
                    tracing::warn!(entity_key = %entity.key, error = %e, "skipping malformed event entity");
                    outcome.skipped += 1;
                }
            }
        }
        Ok(outcome)
    }
}
