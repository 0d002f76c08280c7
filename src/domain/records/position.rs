//! # Position Record
//!
//! A user's position in a market, one record per trade attempt.
//!
//! Positions are append-only: there is no mutation or deletion path. The
//! `market_id` is a soft reference; positions may outlive (or predate) the
//! market entity they point at.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::time;
use crate::domain::value_objects::{Side, Uint};
use serde::{Deserialize, Serialize};

/// Default network label when the caller does not specify one.
pub const DEFAULT_CHAIN: &str = "base";

/// A position taken in a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Soft reference to the market's id.
    pub market_id: String,
    /// Identity string of the position holder.
    pub user: String,
    /// Which side the position is on.
    pub side: Side,
    /// Amount staked, exact decimal string.
    pub amount: Uint,
    /// Shares received; equals `amount` when the caller did not specify.
    pub shares: Uint,
    /// Network label the trade was made on.
    pub chain: String,
    /// Transaction hash, or empty string if the trade never reached chain.
    pub tx_hash: String,
    /// Unix milliseconds of the trade attempt.
    pub timestamp: i64,
}

/// Caller input for recording a position.
#[derive(Debug, Clone)]
pub struct NewPosition {
    /// Market the position belongs to.
    pub market_id: String,
    /// Identity string of the position holder.
    pub user: String,
    /// Which side the position is on.
    pub side: Side,
    /// Amount staked.
    pub amount: Uint,
    /// Shares received; defaults to `amount`.
    pub shares: Option<Uint>,
    /// Network label; defaults to [`DEFAULT_CHAIN`].
    pub chain: Option<String>,
    /// Transaction hash, if the trade reached chain.
    pub tx_hash: Option<String>,
}

impl NewPosition {
    /// Validates the input without constructing a record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] if `market_id` or `user` is
    /// empty, or `amount` is zero.
    pub fn validate(&self) -> DomainResult<()> {
        if self.market_id.trim().is_empty() {
            return Err(DomainError::validation("marketId is required"));
        }
        if self.user.trim().is_empty() {
            return Err(DomainError::validation("user is required"));
        }
        if self.amount.is_zero() {
            return Err(DomainError::validation("amount must be positive"));
        }
        Ok(())
    }
}

impl Position {
    /// Builds a position record from validated caller input, stamping the
    /// current time.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] if the input fails
    /// [`NewPosition::validate`].
    pub fn create(new: NewPosition) -> DomainResult<Self> {
        new.validate()?;

        let amount = new.amount;
        Ok(Self {
            market_id: new.market_id,
            user: new.user,
            side: new.side,
            amount,
            shares: new.shares.unwrap_or(amount),
            chain: new.chain.unwrap_or_else(|| DEFAULT_CHAIN.to_string()),
            tx_hash: new.tx_hash.unwrap_or_default(),
            timestamp: time::now_millis(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_input() -> NewPosition {
        NewPosition {
            market_id: "mkt-1".into(),
            user: "0xdead".into(),
            side: Side::Yes,
            amount: Uint::from(10),
            shares: None,
            chain: None,
            tx_hash: None,
        }
    }

    #[test]
    fn shares_default_to_amount() {
        let position = Position::create(valid_input()).unwrap();
        assert_eq!(position.shares, position.amount);
    }

    #[test]
    fn explicit_shares_are_kept() {
        let mut input = valid_input();
        input.shares = Some(Uint::from(25));
        let position = Position::create(input).unwrap();
        assert_eq!(position.shares, Uint::from(25));
    }

    #[test]
    fn chain_defaults_to_base() {
        let position = Position::create(valid_input()).unwrap();
        assert_eq!(position.chain, DEFAULT_CHAIN);
        assert_eq!(position.tx_hash, "");
    }

    #[test]
    fn rejects_missing_fields() {
        let mut input = valid_input();
        input.market_id = String::new();
        assert!(Position::create(input).is_err());

        let mut input = valid_input();
        input.user = " ".into();
        assert!(Position::create(input).is_err());

        let mut input = valid_input();
        input.amount = Uint::ZERO;
        assert!(Position::create(input).is_err());
    }

    #[test]
    fn payload_uses_camel_case() {
        let position = Position::create(valid_input()).unwrap();
        let json = serde_json::to_value(&position).unwrap();
        assert_eq!(json["marketId"], "mkt-1");
        assert_eq!(json["side"], "YES");
        assert_eq!(json["amount"], "10");
        assert!(json.get("txHash").is_some());
    }
}
