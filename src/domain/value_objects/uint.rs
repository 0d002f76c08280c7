//! # Uint Value Object
//!
//! Unsigned big integer carried as an exact decimal string.
//!
//! Share and liquidity amounts are 256-bit unsigned integers that must
//! survive storage round-trips digit-for-digit. [`Uint`] wraps
//! `ethers::types::U256` and always serializes as a decimal string, never
//! through floating point.
//!
//! # Examples
//!
//! ```
//! use predmarket_store::domain::value_objects::uint::Uint;
//!
//! let amount = Uint::from_dec_str("100").unwrap();
//! assert_eq!(amount.scale_6dp().unwrap().to_string(), "100000000");
//! ```

use ethers::types::U256;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An unsigned 256-bit integer with decimal-string serialization.
///
/// # Invariants
///
/// - Serializes as its exact decimal digits (`"100000000"`)
/// - Deserializes from a decimal string or a non-negative JSON integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uint(U256);

impl Uint {
    /// The zero value.
    pub const ZERO: Self = Self(U256::zero());

    /// Creates a `Uint` from a decimal digit string.
    ///
    /// # Errors
    ///
    /// Returns [`UintParseError`] if the string is not a valid unsigned
    /// decimal integer or exceeds 256 bits.
    pub fn from_dec_str(value: &str) -> Result<Self, UintParseError> {
        let trimmed = value.trim();
        // U256::from_dec_str parses "" as zero; an absent amount is not zero.
        if trimmed.is_empty() {
            return Err(UintParseError {
                value: value.to_string(),
            });
        }
        U256::from_dec_str(trimmed)
            .map(Self)
            .map_err(|_| UintParseError {
                value: value.to_string(),
            })
    }

    /// Returns true if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Scales by `10^6` (6-decimal fixed point).
    ///
    /// Used when converting a human-entered liquidity amount into share
    /// units.
    ///
    /// # Errors
    ///
    /// Returns [`UintParseError`] on 256-bit overflow.
    pub fn scale_6dp(&self) -> Result<Self, UintParseError> {
        self.0
            .checked_mul(U256::from(1_000_000u64))
            .map(Self)
            .ok_or_else(|| UintParseError {
                value: format!("{} * 10^6 overflows", self.0),
            })
    }

    /// Returns half the value, rounding down.
    #[must_use]
    pub fn half(&self) -> Self {
        Self(self.0 / U256::from(2u64))
    }

    /// Coerces to `i64` for numeric annotations, saturating at `i64::MAX`.
    ///
    /// Values beyond the store's numeric range lose precision here; this
    /// affects filterability only, the payload keeps the exact digits.
    #[must_use]
    pub fn to_i64_saturating(&self) -> i64 {
        if self.0 > U256::from(i64::MAX as u64) {
            i64::MAX
        } else {
            self.0.as_u64() as i64
        }
    }
}

impl fmt::Display for Uint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Uint {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl FromStr for Uint {
    type Err = UintParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dec_str(s)
    }
}

/// Error parsing a decimal string into a [`Uint`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid unsigned decimal integer: {value}")]
pub struct UintParseError {
    /// The rejected input.
    pub value: String,
}

impl Serialize for Uint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Uint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UintVisitor)
    }
}

struct UintVisitor;

impl Visitor<'_> for UintVisitor {
    type Value = Uint;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a decimal string or non-negative integer")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Uint::from_dec_str(value).map_err(de::Error::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Uint::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        u64::try_from(value)
            .map(Uint::from)
            .map_err(|_| de::Error::custom("negative value"))
    }
}
