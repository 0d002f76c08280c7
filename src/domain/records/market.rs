//! # Market Record
//!
//! A yes/no prediction market as stored off-chain.
//!
//! Markets are written once at creation time and never updated or deleted
//! through the adapter; resolution happens on-chain and is not mirrored
//! back into the store. Share and liquidity amounts use 6-decimal
//! fixed-point units carried as exact decimal strings.
//!
//! # Examples
//!
//! ```
//! use predmarket_store::domain::records::market::{Market, NewMarket};
//! use predmarket_store::domain::value_objects::Uint;
//!
//! let market = Market::create(NewMarket {
//!     question: "Will ETH close above 5k this year?".into(),
//!     end_time: 1_767_225_600,
//!     initial_liquidity: Uint::from(100),
//!     civic_gated: false,
//!     creator: None,
//! })
//! .unwrap();
//!
//! assert_eq!(market.total_liquidity.to_string(), "100000000");
//! assert_eq!(market.yes_shares, market.no_shares);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::time;
use crate::domain::value_objects::{Side, Uint};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum accepted length of a market question, in characters.
pub const MAX_QUESTION_LEN: usize = 500;

/// Payout token address stamped on every market (testnet USDC).
pub const DEFAULT_PAYOUT_TOKEN: &str = "0x036CbD53842c5426634e7929541eC2318f3dCF7e";

/// Civic rule tag applied to gated markets.
pub const CIVIC_RULE_KYC: &str = "kyc-required";

/// A yes/no prediction market record.
///
/// # Invariants
///
/// - `id` is a client-generated UUID, unique per market
/// - `yes_shares + no_shares <= total_liquidity` at creation
/// - amounts are exact decimal strings in 6-decimal fixed-point units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Client-generated unique identifier.
    pub id: String,
    /// The yes/no question the market resolves.
    pub question: String,
    /// Unix seconds after which the market stops trading.
    pub end_time: i64,
    /// Identity string of the creating caller.
    pub creator: String,
    /// Empty string, or a gating policy tag such as `kyc-required`.
    pub civic_rule: String,
    /// Chain address of the payout token.
    pub payout_token: String,
    /// Outstanding YES shares, 6-decimal fixed point.
    pub yes_shares: Uint,
    /// Outstanding NO shares, 6-decimal fixed point.
    pub no_shares: Uint,
    /// Total liquidity, 6-decimal fixed point.
    pub total_liquidity: Uint,
    /// Whether the market has been resolved on-chain.
    pub is_resolved: bool,
    /// Winning side, present only after resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
    /// Unix seconds of creation.
    pub created_at: i64,
}

/// Caller input for creating a market.
#[derive(Debug, Clone)]
pub struct NewMarket {
    /// The yes/no question text.
    pub question: String,
    /// Unix seconds after which the market stops trading.
    pub end_time: i64,
    /// Human-entered liquidity amount, scaled by `10^6` at creation.
    pub initial_liquidity: Uint,
    /// Whether the market requires identity gating.
    pub civic_gated: bool,
    /// Creating caller identity; defaults to `anonymous`.
    pub creator: Option<String>,
}

impl NewMarket {
    /// Validates the input without constructing a record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] if the question is empty or
    /// over [`MAX_QUESTION_LEN`] characters, the end time is not positive,
    /// or the initial liquidity is zero.
    pub fn validate(&self) -> DomainResult<()> {
        if self.question.trim().is_empty() {
            return Err(DomainError::validation("question is required"));
        }
        if self.question.chars().count() > MAX_QUESTION_LEN {
            return Err(DomainError::validation(format!(
                "question exceeds {MAX_QUESTION_LEN} characters"
            )));
        }
        if self.end_time <= 0 {
            return Err(DomainError::validation("endTime must be a positive unix timestamp"));
        }
        if self.initial_liquidity.is_zero() {
            return Err(DomainError::validation("initialLiquidity must be positive"));
        }
        Ok(())
    }
}

impl Market {
    /// Builds a market record from validated caller input.
    ///
    /// Assigns a fresh UUID, stamps the creation time, and applies
    /// 6-decimal fixed-point scaling: total liquidity is
    /// `initial_liquidity * 10^6` and each side starts with half of it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] if the input fails
    /// [`NewMarket::validate`] or the scaled liquidity overflows 256 bits.
    pub fn create(new: NewMarket) -> DomainResult<Self> {
        new.validate()?;

        let total_liquidity = new
            .initial_liquidity
            .scale_6dp()
            .map_err(|e| DomainError::validation(e.to_string()))?;
        let side_shares = total_liquidity.half();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            question: new.question,
            end_time: new.end_time,
            creator: new.creator.unwrap_or_else(|| "anonymous".to_string()),
            civic_rule: if new.civic_gated {
                CIVIC_RULE_KYC.to_string()
            } else {
                String::new()
            },
            payout_token: DEFAULT_PAYOUT_TOKEN.to_string(),
            yes_shares: side_shares,
            no_shares: side_shares,
            total_liquidity,
            is_resolved: false,
            winner: None,
            created_at: time::now_secs(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_input() -> NewMarket {
        NewMarket {
            question: "Will it rain tomorrow?".into(),
            end_time: 1_900_000_000,
            initial_liquidity: Uint::from(100),
            civic_gated: false,
            creator: Some("0xabc".into()),
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn accepts_valid_input() {
            assert!(valid_input().validate().is_ok());
        }

        #[test]
        fn rejects_empty_question() {
            let mut input = valid_input();
            input.question = "   ".into();
            assert!(input.validate().is_err());
        }

        #[test]
        fn rejects_overlong_question() {
            let mut input = valid_input();
            input.question = "x".repeat(MAX_QUESTION_LEN + 1);
            assert!(input.validate().is_err());
        }

        #[test]
        fn rejects_zero_liquidity() {
            let mut input = valid_input();
            input.initial_liquidity = Uint::ZERO;
            assert!(input.validate().is_err());
        }

        #[test]
        fn rejects_non_positive_end_time() {
            let mut input = valid_input();
            input.end_time = 0;
            assert!(input.validate().is_err());
        }
    }

    mod creation {
        use super::*;

        #[test]
        fn scales_liquidity_to_6dp() {
            let market = Market::create(valid_input()).unwrap();
            assert_eq!(market.total_liquidity.to_string(), "100000000");
            assert_eq!(market.yes_shares.to_string(), "50000000");
            assert_eq!(market.no_shares.to_string(), "50000000");
        }

        #[test]
        fn defaults_creator_to_anonymous() {
            let mut input = valid_input();
            input.creator = None;
            let market = Market::create(input).unwrap();
            assert_eq!(market.creator, "anonymous");
        }

        #[test]
        fn gated_market_carries_civic_rule() {
            let mut input = valid_input();
            input.civic_gated = true;
            let market = Market::create(input).unwrap();
            assert_eq!(market.civic_rule, CIVIC_RULE_KYC);
        }

        #[test]
        fn fresh_market_is_unresolved() {
            let market = Market::create(valid_input()).unwrap();
            assert!(!market.is_resolved);
            assert!(market.winner.is_none());
        }

        #[test]
        fn ids_are_unique() {
            let a = Market::create(valid_input()).unwrap();
            let b = Market::create(valid_input()).unwrap();
            assert_ne!(a.id, b.id);
        }
    }

    mod wire_format {
        use super::*;

        #[test]
        fn payload_uses_camel_case_and_string_amounts() {
            let market = Market::create(valid_input()).unwrap();
            let json = serde_json::to_value(&market).unwrap();
            assert_eq!(json["totalLiquidity"], "100000000");
            assert_eq!(json["isResolved"], false);
            assert!(json.get("winner").is_none());
            assert!(json.get("endTime").is_some());
        }
    }
}
