//! # Infrastructure Layer
//!
//! Adapters to external systems: the annotated entity store and the
//! per-kind repositories built on top of it.

pub mod repositories;
pub mod store;
