//! # Domain Layer
//!
//! Records, value objects, and validation rules for the prediction-market
//! metadata store. The domain layer has no knowledge of the remote store;
//! it only guarantees that records handed to the adapter are well-formed.

pub mod errors;
pub mod records;
pub mod value_objects;
