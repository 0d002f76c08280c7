//! # Predmarket Store
//!
//! Storage adapter for a prediction-market demo over an annotated
//! entity store: a remote key-value service whose entities carry
//! queryable string/numeric tags and a block-denominated time-to-live.
//!
//! The crate is organised in three layers:
//!
//! - [`domain`] - records ([`Market`](domain::records::Market),
//!   [`Position`](domain::records::Position),
//!   [`Event`](domain::records::Event)) and the value objects they share
//! - [`infrastructure`] - the entity codec, annotation builders, filter
//!   expressions, the JSON-RPC store client with its once-initialized
//!   shared session, and the per-kind repositories
//! - [`api`] - the axum REST surface serving the market data endpoints
//!
//! Records are append-only: nothing is ever updated or deleted, and TTL
//! expiry is the store's only deletion path.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{ServerConfig, StoreConfig};
pub use domain::records::{Event, Market, NewEvent, NewMarket, NewPosition, Position};
pub use infrastructure::repositories::{EventRepository, MarketRepository, PositionRepository};
pub use infrastructure::store::SharedStore;
