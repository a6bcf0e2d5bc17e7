//! # Sieve
//!
//! Compiles declarative, serializable filter requests into parameterized,
//! tenant-scoped SQL for SQLite, PostgreSQL and MySQL.
//!
//! ## Quick Start
//!
//! ```rust
//! use sieve::prelude::*;
//!
//! let registry = SchemaRegistry::new().with(
//!     EntityMeta::new("product", "products")
//!         .tenant_column("app_id")
//!         .soft_delete("deleted_at"),
//! );
//! let compiler = Compiler::new(registry, CompileOptions::new(Dialect::PostgreSQL));
//!
//! let request: FilterRequest = serde_json::from_str(
//!     r#"{"search": "foo", "search_by": ["name", "tags.label"], "page": 1, "per_page": 10}"#,
//! )
//! .unwrap();
//! let query = compiler.compile_for("product", &request, Some("acme")).unwrap();
//!
//! let rows = query.rows_statement();
//! assert!(rows.sql.contains(r#"CAST("t0"."name" AS TEXT) ILIKE $2 OR "t0"."tags" ->> 'label' ILIKE $3"#));
//! assert!(rows.sql.ends_with("LIMIT 10 OFFSET 0"));
//! ```
//!
//! ## Filter axes
//!
//! | Axis | Request fields | Compiles to |
//! |------|----------------|-------------|
//! | Basic | `filter_by`, `filter`, `filter_condition` | `IN` / `NOT IN` on root columns |
//! | Nested relation | `filter_nested_by`, `filter_nested`, `filter_nested_condition` | correlated `EXISTS` |
//! | Parent | `filter_nested_parent_by`, `filter_nested_parent`, `filter_nested_parent_condition` | `IN` / `NOT IN` on the parent, joined when `parent_scope` is on |
//! | Many-to-many | `filter_m2m_by`, `filter_m2m`, `filter_m2m_condition` | key `IN (subquery)` |
//! | Search | `search`, `search_by` | case-insensitive `LIKE`, ORed |
//! | Range | `start`, `start_by`, `end`, `end_by`, `start_and_end_condition` | `>=` / `<=` |
//! | Group | `group_by`, `group_sort_by`, `group_sort` | representative row per group |
//! | Sort | `sort`, `sort_by` | `ORDER BY` |
//! | Preload | `preload` | JSON columns |
//! | Pagination | `page`, `per_page` | `LIMIT` / `OFFSET` |
//!
//! ## Features
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `rusqlite` | `QueryExecutor` for `rusqlite::Connection` |
//! | `tracing` | Debug events for compiles, skipped entries and statements |

pub use sieve_core::*;

#[cfg(feature = "rusqlite")]
pub use rusqlite;
