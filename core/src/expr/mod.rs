//! Expression builder.
//!
//! Pure functions turning a column path and a set of bound parameters into
//! column references and predicate leaves. Nothing here touches a binder or a
//! resolver; callers bind values first and pass the resulting [`Param`]s in.
//!
//! ```
//! use sieve_core::expr::{column_ref, in_list};
//! use sieve_core::param::Param;
//! use sieve_core::{Dialect, Value};
//!
//! let status = column_ref(Dialect::PostgreSQL, "t0", "meta", Some("status"));
//! let predicate = in_list(status, vec![Param::new("filter_0_1", Value::from("active"))]).unwrap();
//! let stmt = predicate.to_sql(Dialect::PostgreSQL).render(Dialect::PostgreSQL);
//! assert_eq!(stmt.sql, r#""t0"."meta" ->> 'status' IN ($1)"#);
//! ```
//!
//! [`Param`]: crate::param::Param

mod cmp;
mod set;
mod string;

pub use cmp::*;
pub use set::*;
pub use string::*;

use sieve_types::Dialect;

use crate::dialect::DialectExt;
use crate::path::FieldPath;
use crate::sql::SQL;

// =============================================================================
// Column references
// =============================================================================

/// `alias.column`, or the textual extraction of `key` from it.
pub fn column_ref(dialect: Dialect, alias: &str, column: &str, key: Option<&str>) -> SQL {
    let column = SQL::qualified(alias, column);
    match key {
        Some(key) => dialect.json_extract(column, key),
        None => column,
    }
}

/// Column reference for the leaf of `path` under `alias`.
pub fn path_ref(dialect: Dialect, alias: &str, path: &FieldPath) -> SQL {
    column_ref(dialect, alias, path.column(), path.json_key())
}

/// Like [`path_ref`], but plain columns are cast to text so they can be
/// pattern matched regardless of their type.
pub fn text_ref(dialect: Dialect, alias: &str, path: &FieldPath) -> SQL {
    match path.json_key() {
        Some(_) => path_ref(dialect, alias, path),
        None => dialect.text_cast(path_ref(dialect, alias, path)),
    }
}
