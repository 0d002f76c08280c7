//! # Annotation Builder
//!
//! Derives the queryable tag maps for each record kind.
//!
//! Rules:
//! - every entity carries its kind in a `type` string tag;
//! - string tags hold exact-match dimensions (ids, identities, sides,
//!   chain labels); booleans are rendered `"true"`/`"false"` since the
//!   filter language is string/number only;
//! - numeric tags hold range-filterable values; big-integer fields are
//!   coerced with saturation (see [`Uint::to_i64_saturating`]), a known
//!   limitation affecting filterability only;
//! - long free text that is never filtered on exactly (the market
//!   question) is truncated to [`MAX_TAG_TEXT_LEN`] characters, with the
//!   full value staying in the payload; values used as exact query
//!   dimensions are stored untruncated;
//! - when a database key scopes the deployment, every entity carries it in
//!   a `databaseKey` tag.

use crate::domain::records::{Event, Market, Position};
use crate::domain::value_objects::Uint;
use crate::infrastructure::store::entity::TagSet;

/// Maximum length of a free-text tag value, in characters.
///
/// Respects the store's indexing limits; the untruncated text is always
/// recoverable from the payload.
pub const MAX_TAG_TEXT_LEN: usize = 50;

/// Truncates free text to [`MAX_TAG_TEXT_LEN`] characters on a char
/// boundary.
#[must_use]
pub fn truncate_tag_text(text: &str) -> String {
    text.chars().take(MAX_TAG_TEXT_LEN).collect()
}

fn bool_tag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn push_scope(tags: &mut TagSet, database_key: Option<&str>) {
    if let Some(key) = database_key {
        tags.push_str("databaseKey", key);
    }
}

/// Builds the tag maps for a market entity.
#[must_use]
pub fn market_tags(market: &Market, database_key: Option<&str>) -> TagSet {
    let mut tags = TagSet::new();
    tags.push_str("type", "market");
    tags.push_str("id", &market.id);
    tags.push_str("creator", &market.creator);
    tags.push_str("civicRule", &market.civic_rule);
    tags.push_str("isResolved", bool_tag(market.is_resolved));
    tags.push_str("question", truncate_tag_text(&market.question));
    push_scope(&mut tags, database_key);

    tags.push_num("endTime", market.end_time);
    tags.push_num("createdAt", market.created_at);
    tags.push_num("totalLiquidity", market.total_liquidity.to_i64_saturating());
    tags
}

/// Builds the tag maps for a position entity.
#[must_use]
pub fn position_tags(position: &Position, database_key: Option<&str>) -> TagSet {
    let mut tags = TagSet::new();
    tags.push_str("type", "position");
    tags.push_str("marketId", &position.market_id);
    tags.push_str("user", &position.user);
    tags.push_str("side", position.side.as_str());
    tags.push_str("chain", &position.chain);
    tags.push_str("txHash", &position.tx_hash);
    push_scope(&mut tags, database_key);

    tags.push_num("amount", position.amount.to_i64_saturating());
    tags.push_num("shares", position.shares.to_i64_saturating());
    tags.push_num("timestamp", position.timestamp);
    tags
}

/// Builds the tag maps for an event entity.
///
/// The record's own free-form type lands in `eventType`; the `type` tag
/// stays reserved for the record kind.
#[must_use]
pub fn event_tags(event: &Event, database_key: Option<&str>) -> TagSet {
    let mut tags = TagSet::new();
    tags.push_str("type", "event");
    // Not truncated: queries filter on the caller's exact value.
    tags.push_str("eventType", &event.event_type);
    tags.push_str("marketId", &event.market_id);
    tags.push_str("user", &event.user);
    push_scope(&mut tags, database_key);

    tags.push_num("timestamp", event.timestamp);
    tags
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::records::market::NewMarket;
    use crate::domain::records::{NewEvent, NewPosition};
    use crate::domain::value_objects::Side;

    fn sample_market(question: &str) -> Market {
        Market::create(NewMarket {
            question: question.into(),
            end_time: 1_900_000_000,
            initial_liquidity: Uint::from(100),
            civic_gated: false,
            creator: Some("0xfeed".into()),
        })
        .unwrap()
    }

    mod truncation {
        use super::*;

        #[test]
        fn long_question_tag_is_exactly_50_chars() {
            let question = "q".repeat(120);
            let market = sample_market(&question);
            let tags = market_tags(&market, None);

            let tag = tags.get_str("question").unwrap();
            assert_eq!(tag.chars().count(), MAX_TAG_TEXT_LEN);
            assert_eq!(tag, &question[..MAX_TAG_TEXT_LEN]);
            // Full value still lives in the record itself.
            assert_eq!(market.question.len(), 120);
        }

        #[test]
        fn short_text_is_untouched() {
            assert_eq!(truncate_tag_text("short"), "short");
        }

        #[test]
        fn truncation_respects_char_boundaries() {
            let text = "é".repeat(60);
            let truncated = truncate_tag_text(&text);
            assert_eq!(truncated.chars().count(), MAX_TAG_TEXT_LEN);
        }
    }

    mod market {
        use super::*;

        #[test]
        fn carries_type_and_rendered_boolean() {
            let market = sample_market("Will it rain?");
            let tags = market_tags(&market, None);
            assert_eq!(tags.get_str("type"), Some("market"));
            assert_eq!(tags.get_str("isResolved"), Some("false"));
            assert_eq!(tags.get_str("id"), Some(market.id.as_str()));
            assert_eq!(tags.get_num("endTime"), Some(1_900_000_000));
            assert_eq!(tags.get_num("totalLiquidity"), Some(100_000_000));
        }

        #[test]
        fn database_key_scopes_when_configured() {
            let market = sample_market("Will it rain?");
            let tags = market_tags(&market, Some("0xdb"));
            assert_eq!(tags.get_str("databaseKey"), Some("0xdb"));
            let unscoped = market_tags(&market, None);
            assert!(unscoped.get_str("databaseKey").is_none());
        }

        #[test]
        fn huge_liquidity_saturates_numeric_tag() {
            let market = Market::create(NewMarket {
                question: "big".into(),
                end_time: 1,
                initial_liquidity: Uint::from_dec_str("99999999999999999999999").unwrap(),
                civic_gated: false,
                creator: None,
            })
            .unwrap();
            let tags = market_tags(&market, None);
            assert_eq!(tags.get_num("totalLiquidity"), Some(i64::MAX));
        }
    }

    mod position {
        use super::*;

        #[test]
        fn carries_side_and_chain() {
            let position = crate::domain::records::Position::create(NewPosition {
                market_id: "mkt-1".into(),
                user: "0xdead".into(),
                side: Side::No,
                amount: Uint::from(10),
                shares: None,
                chain: None,
                tx_hash: None,
            })
            .unwrap();
            let tags = position_tags(&position, None);
            assert_eq!(tags.get_str("type"), Some("position"));
            assert_eq!(tags.get_str("side"), Some("NO"));
            assert_eq!(tags.get_str("chain"), Some("base"));
            assert_eq!(tags.get_num("amount"), Some(10));
        }
    }

    mod event {
        use super::*;

        #[test]
        fn reserves_type_for_record_kind() {
            let event = crate::domain::records::Event::create(NewEvent {
                event_type: "market_created".into(),
                market_id: Some("mkt-1".into()),
                user: None,
                data: None,
                timestamp: Some(7),
            })
            .unwrap();
            let tags = event_tags(&event, None);
            assert_eq!(tags.get_str("type"), Some("event"));
            assert_eq!(tags.get_str("eventType"), Some("market_created"));
            assert_eq!(tags.get_str("user"), Some(""));
            assert_eq!(tags.get_num("timestamp"), Some(7));
        }

        #[test]
        fn long_event_type_is_not_truncated() {
            let event_type = "x".repeat(MAX_TAG_TEXT_LEN + 10);
            let event = crate::domain::records::Event::create(NewEvent {
                event_type: event_type.clone(),
                market_id: None,
                user: None,
                data: None,
                timestamp: None,
            })
            .unwrap();
            let tags = event_tags(&event, None);
            assert_eq!(tags.get_str("eventType"), Some(event_type.as_str()));
        }
    }
}
