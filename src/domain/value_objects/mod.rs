//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Numeric Types
//!
//! - [`Uint`]: unsigned 256-bit integer carried as an exact decimal string
//!
//! ## Domain Enums
//!
//! - [`Side`]: YES or NO
//! - [`RecordKind`]: which repository owns a stored entity
//!
//! ## Time
//!
//! - [`time`]: unix-epoch clock helpers

pub mod enums;
pub mod time;
pub mod uint;

pub use enums::{RecordKind, Side};
pub use uint::{Uint, UintParseError};
