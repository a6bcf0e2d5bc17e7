//! Sieve CLI - compile and run filter requests from the command line
//!
//! Entities and compile options live in a `sieve.toml` file, so requests can
//! be inspected without writing Rust code.
//!
//! # Configuration
//!
//! ```toml
//! dialect = "sqlite"
//!
//! [options]
//! default_tenant = "1"
//!
//! [[entities]]
//! name = "user"
//! table = "users"
//! tenant_column = "app_id"
//! soft_delete_column = "deleted_at"
//! ```
//!
//! # Commands
//!
//! - `sieve check` - Validate the configuration and list entities
//! - `sieve compile --entity user --request req.json` - Print the rows and count statements
//! - `sieve query --entity user --request req.json --database app.db` - Run against SQLite and print the page

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use config::{Config, Error as ConfigError};
pub use error::CliError;
