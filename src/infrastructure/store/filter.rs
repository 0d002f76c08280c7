//! # Filter Expressions
//!
//! Structured predicates for selecting live entities by their tags.
//!
//! A [`Filter`] is a conjunction of tag clauses, always anchored on the
//! record kind's `type` tag. The structured form is what crosses the
//! [`EntityStore`](crate::infrastructure::store::client::EntityStore)
//! port; only the RPC implementation renders it to the store's filter
//! language, and the renderer escapes quote and backslash characters so
//! tag values can never break out of the expression.
//!
//! # Examples
//!
//! ```
//! use predmarket_store::domain::value_objects::RecordKind;
//! use predmarket_store::infrastructure::store::filter::Filter;
//!
//! let filter = Filter::kind(RecordKind::Position)
//!     .eq_str("marketId", "mkt-1")
//!     .eq_str("user", "0xdead");
//!
//! assert_eq!(
//!     filter.render(),
//!     r#"type = "position" && marketId = "mkt-1" && user = "0xdead""#
//! );
//! ```

use crate::domain::value_objects::RecordKind;
use crate::infrastructure::store::entity::TagSet;
use std::fmt;
use std::fmt::Write as _;

/// Comparison operator for numeric clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumOp {
    /// Equal.
    Eq,
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Ge,
}

impl NumOp {
    const fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    fn eval(&self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Clause {
    Str { name: String, value: String },
    Num { name: String, op: NumOp, value: i64 },
}

/// A conjunction of tag clauses anchored on a record kind.
///
/// An entity lacking a tag a clause filters on is simply excluded from
/// results, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    kind: RecordKind,
    clauses: Vec<Clause>,
}

impl Filter {
    /// Starts a filter anchored on `type = "<kind>"`.
    #[must_use]
    pub fn kind(kind: RecordKind) -> Self {
        Self {
            kind,
            clauses: Vec::new(),
        }
    }

    /// Returns the anchored record kind.
    #[must_use]
    pub fn record_kind(&self) -> RecordKind {
        self.kind
    }

    /// ANDs an exact-match string clause.
    #[must_use]
    pub fn eq_str(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.push(Clause::Str {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// ANDs a numeric equality clause.
    #[must_use]
    pub fn eq_num(self, name: impl Into<String>, value: i64) -> Self {
        self.cmp_num(name, NumOp::Eq, value)
    }

    /// ANDs a numeric comparison clause.
    #[must_use]
    pub fn cmp_num(mut self, name: impl Into<String>, op: NumOp, value: i64) -> Self {
        self.clauses.push(Clause::Num {
            name: name.into(),
            op,
            value,
        });
        self
    }

    /// Renders the filter in the store's expression language.
    ///
    /// String values are escaped so embedded quotes or backslashes cannot
    /// alter the expression structure.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("type = \"{}\"", self.kind.as_str());
        for clause in &self.clauses {
            match clause {
                Clause::Str { name, value } => {
                    let _ = write!(out, " && {name} = \"{}\"", escape(value));
                }
                Clause::Num { name, op, value } => {
                    let _ = write!(out, " && {name} {} {value}", op.symbol());
                }
            }
        }
        out
    }

    /// Evaluates the filter against an entity's tags.
    ///
    /// Used by the in-memory store; the remote store evaluates the
    /// rendered expression instead.
    #[must_use]
    pub fn matches(&self, tags: &TagSet) -> bool {
        if tags.get_str("type") != Some(self.kind.as_str()) {
            return false;
        }
        self.clauses.iter().all(|clause| match clause {
            Clause::Str { name, value } => tags.get_str(name) == Some(value.as_str()),
            Clause::Num { name, op, value } => {
                tags.get_num(name).is_some_and(|tag| op.eval(tag, *value))
            }
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)], nums: &[(&str, i64)]) -> TagSet {
        let mut set = TagSet::new();
        for (name, value) in pairs {
            set.push_str(*name, *value);
        }
        for (name, value) in nums {
            set.push_num(*name, *value);
        }
        set
    }

    mod rendering {
        use super::*;

        #[test]
        fn bare_kind_renders_anchor_only() {
            assert_eq!(
                Filter::kind(RecordKind::Market).render(),
                r#"type = "market""#
            );
        }

        #[test]
        fn clauses_join_with_and() {
            let filter = Filter::kind(RecordKind::Event)
                .eq_str("eventType", "market_joined")
                .cmp_num("timestamp", NumOp::Ge, 100);
            assert_eq!(
                filter.render(),
                r#"type = "event" && eventType = "market_joined" && timestamp >= 100"#
            );
        }

        #[test]
        fn quote_characters_are_escaped() {
            let filter = Filter::kind(RecordKind::Market)
                .eq_str("question", r#"he said "yes" && type = "event""#);
            let rendered = filter.render();
            assert!(rendered.contains(r#"\"yes\""#));
            // The injected clause stays inside the quoted value.
            assert!(!rendered.contains(r#" && type = "event" &&"#));
        }

        #[test]
        fn backslashes_are_escaped() {
            let filter = Filter::kind(RecordKind::Market).eq_str("id", r"a\b");
            assert!(filter.render().contains(r"a\\b"));
        }
    }

    mod matching {
        use super::*;

        #[test]
        fn kind_anchor_excludes_other_kinds() {
            let filter = Filter::kind(RecordKind::Market);
            let market = tags(&[("type", "market")], &[]);
            let position = tags(&[("type", "position")], &[]);
            assert!(filter.matches(&market));
            assert!(!filter.matches(&position));
        }

        #[test]
        fn missing_tag_excludes_without_error() {
            let filter = Filter::kind(RecordKind::Position).eq_str("user", "0xdead");
            let no_user = tags(&[("type", "position")], &[]);
            assert!(!filter.matches(&no_user));
        }

        #[test]
        fn numeric_comparisons() {
            let set = tags(&[("type", "event")], &[("timestamp", 50)]);
            assert!(
                Filter::kind(RecordKind::Event)
                    .cmp_num("timestamp", NumOp::Ge, 50)
                    .matches(&set)
            );
            assert!(
                !Filter::kind(RecordKind::Event)
                    .cmp_num("timestamp", NumOp::Gt, 50)
                    .matches(&set)
            );
            assert!(
                Filter::kind(RecordKind::Event)
                    .eq_num("timestamp", 50)
                    .matches(&set)
            );
        }

        #[test]
        fn all_clauses_must_hold() {
            let set = tags(&[("type", "position"), ("user", "a"), ("marketId", "m")], &[]);
            let filter = Filter::kind(RecordKind::Position)
                .eq_str("user", "a")
                .eq_str("marketId", "other");
            assert!(!filter.matches(&set));
        }
    }
}
