//! # API Layer
//!
//! External interfaces; currently the REST surface only.

pub mod rest;
