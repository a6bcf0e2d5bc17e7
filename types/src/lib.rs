//! Shared type definitions for sieve
//!
//! This crate provides the leaf types used across the sieve crates:
//!
//! - [`Dialect`] - Target SQL dialect (SQLite, PostgreSQL, MySQL)
//! - [`Value`] - A bindable scalar value supplied by a filter request
//!
//! # Features
//!
//! - `serde` - Enable serde serialization/deserialization
//! - `rusqlite` - Bind and read [`Value`] through rusqlite

mod dialect;
#[cfg(feature = "rusqlite")]
mod drivers;
mod value;

pub use dialect::{Dialect, DialectParseError};
pub use value::Value;

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::Dialect;
    pub use crate::Value;
}
