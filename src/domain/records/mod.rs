//! # Domain Records
//!
//! The three record kinds persisted through the entity store adapter:
//!
//! - [`Market`]: write-once yes/no markets
//! - [`Position`]: append-only trade records
//! - [`Event`]: append-only, short-lived activity feed
//!
//! Each record has a `New*` input type validated eagerly via
//! [`DomainError::Validation`](crate::domain::errors::DomainError) before
//! any store call is attempted.

pub mod event;
pub mod market;
pub mod position;

pub use event::{Event, NewEvent};
pub use market::{Market, NewMarket};
pub use position::{NewPosition, Position};
