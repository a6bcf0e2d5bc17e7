//! Filter-to-query compiler.
//!
//! Compiles a declarative [`FilterRequest`] against registered entity
//! metadata into a parameterized, tenant-scoped [`CompiledQuery`]: a predicate
//! tree with EXISTS and membership subqueries for relations, ordering,
//! representative-row grouping, JSON preloads and pagination, rendered for
//! SQLite, PostgreSQL or MySQL.
//!
//! ```
//! use sieve_core::prelude::*;
//!
//! let registry = SchemaRegistry::new().with(
//!     EntityMeta::new("user", "users")
//!         .tenant_column("app_id")
//!         .relation(RelationDescriptor::has_many("orders", "orders", "user_id")),
//! );
//! let compiler = Compiler::new(registry, CompileOptions::default());
//!
//! let request = FilterRequest::new()
//!     .filter_nested_by("orders.status", ["paid"])
//!     .paginate(1, 20);
//! let query = compiler.compile_for("user", &request, Some("42")).unwrap();
//!
//! let count = query.count_statement();
//! assert!(count.sql.starts_with(r#"SELECT COUNT(DISTINCT "t0"."id")"#));
//! assert!(count.sql.contains("EXISTS (SELECT 1 FROM"));
//! assert_eq!(query.take(), Some(20));
//! ```
//!
//! # Features
//!
//! - `tracing` - Emit debug events for compiles, skipped entries and statements
//! - `rusqlite` - [`QueryExecutor`] for `rusqlite::Connection`

mod tracing;

pub mod compile;
pub mod compiled;
pub mod dialect;
pub mod error;
pub mod execute;
pub mod expr;
pub mod options;
pub mod param;
pub mod path;
pub mod predicate;
pub mod request;
pub mod schema;
pub mod select;
pub mod sql;

pub use compile::Compiler;
pub use compiled::CompiledQuery;
pub use dialect::{Dialect, DialectExt};
pub use error::{Result, SieveError};
pub use execute::{Page, QueryExecutor, Row};
pub use options::CompileOptions;
pub use param::{Param, ParamBinder, ParamMap};
pub use path::FieldPath;
pub use predicate::Predicate;
pub use request::{Condition, FilterRequest, GroupSort, ValidationError};
pub use schema::{EntityMeta, MetadataResolver, RelationDescriptor, RelationKind, SchemaRegistry};
pub use sieve_types::Value;
pub use sql::{SQL, Statement};

pub mod prelude {
    pub use crate::compile::Compiler;
    pub use crate::compiled::CompiledQuery;
    pub use crate::execute::{Page, QueryExecutor, Row};
    pub use crate::options::CompileOptions;
    pub use crate::request::{Condition, FilterRequest, GroupSort};
    pub use crate::schema::{EntityMeta, MetadataResolver, RelationDescriptor, RelationKind, SchemaRegistry};
    pub use sieve_types::{Dialect, Value};
}
