//! # Event Record
//!
//! A transient activity-feed entry, not a ledger of record.
//!
//! Events carry a free-form type tag (`market_created`,
//! `zeta_market_joined`, `zeta_market_join_failed`, ...) plus optional
//! market/user references and an arbitrary JSON data blob. They are
//! append-only with short retention and are only ever read back by filter.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::time;
use serde::{Deserialize, Serialize};

/// An activity-feed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Free-form event type tag.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Soft reference to a market id, or empty string.
    pub market_id: String,
    /// Identity string of the acting user, or empty string.
    pub user: String,
    /// Arbitrary event payload.
    pub data: serde_json::Value,
    /// Unix milliseconds the event occurred.
    pub timestamp: i64,
}

/// Caller input for recording an event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Free-form event type tag; the only required field.
    pub event_type: String,
    /// Market the event relates to, if any.
    pub market_id: Option<String>,
    /// Acting user, if any.
    pub user: Option<String>,
    /// Arbitrary event payload; defaults to an empty object.
    pub data: Option<serde_json::Value>,
    /// Event time in unix milliseconds; defaults to now.
    pub timestamp: Option<i64>,
}

impl NewEvent {
    /// Validates the input without constructing a record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] if the event type is empty.
    pub fn validate(&self) -> DomainResult<()> {
        if self.event_type.trim().is_empty() {
            return Err(DomainError::validation("event type is required"));
        }
        Ok(())
    }
}

impl Event {
    /// Builds an event record from validated caller input.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] if the input fails
    /// [`NewEvent::validate`].
    pub fn create(new: NewEvent) -> DomainResult<Self> {
        new.validate()?;

        Ok(Self {
            event_type: new.event_type,
            market_id: new.market_id.unwrap_or_default(),
            user: new.user.unwrap_or_default(),
            data: new
                .data
                .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
            timestamp: new.timestamp.unwrap_or_else(time::now_millis),
        })
    }
}
