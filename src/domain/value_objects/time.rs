//! # Time Helpers
//!
//! Unix-epoch clock helpers for record timestamps.
//!
//! Domain records carry raw unix timestamps (seconds for market lifecycle
//! fields, milliseconds for activity timestamps) so that payloads round-trip
//! through the store byte-for-byte. These helpers are the only place the
//! wall clock is read.

use chrono::Utc;

/// Returns the current unix timestamp in seconds.
#[must_use]
pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}

/// Returns the current unix timestamp in milliseconds.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_secs_is_positive() {
        assert!(now_secs() > 1_700_000_000);
    }

    #[test]
    fn now_millis_matches_secs() {
        let secs = now_secs();
        let millis = now_millis();
        let diff = millis / 1000 - secs;
        assert!((0..=1).contains(&diff));
    }
}
