//! # Domain Enums
//!
//! Small closed enumerations shared across the domain layer.
//!
//! - [`Side`] - the yes/no side of a position
//! - [`RecordKind`] - which repository owns a stored entity
//!
//! Both implement `Display`, `FromStr` where meaningful, and Serde traits
//! matching the wire casing of the stored payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The side of a yes/no market a position is taken on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Betting the market resolves yes.
    Yes,
    /// Betting the market resolves no.
    No,
}

impl Side {
    /// Returns the side as its wire string (`"YES"` / `"NO"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "YES" => Ok(Self::Yes),
            "NO" => Ok(Self::No),
            other => Err(format!("unknown side: {other}")),
        }
    }
}

/// The kind of domain record an entity holds.
///
/// Every stored entity carries its kind in a `type` string tag; filter
/// queries are always anchored on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A yes/no prediction market.
    Market,
    /// A user position in a market.
    Position,
    /// An activity-feed event.
    Event,
}

impl RecordKind {
    /// Returns the kind as its tag value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Position => "position",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
