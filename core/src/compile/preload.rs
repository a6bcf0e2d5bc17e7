//! Eager loading of relations as JSON columns.
//!
//! Each preloaded relation becomes one scalar subquery in the select list: an
//! array of objects for to-many relations, a single object for `belongs_to`.
//! Root rows are never multiplied, so DISTINCT and pagination stay exact.

use compact_str::format_compact;

use super::{Scope, relation};
use crate::dialect::DialectExt;
use crate::sieve_trace_skip;
use crate::request::FilterRequest;
use crate::sql::SQL;

const AXIS: &str = "preload";

pub(super) fn compile(scope: &Scope<'_>, request: &FilterRequest) -> Vec<SQL> {
    let dialect = scope.dialect();
    let mut seen: Vec<&str> = Vec::new();
    let mut columns = Vec::new();

    for (i, name) in request.preload.iter().enumerate() {
        if seen.contains(&name.as_str()) {
            continue;
        }
        seen.push(name);

        let Some(descriptor) = scope.entity.find_relation(name) else {
            sieve_trace_skip!(AXIS, name, "unknown relation");
            continue;
        };

        let alias = format_compact!("{}_p{i}", scope.alias());
        let pairs = descriptor
            .columns
            .iter()
            .map(|c| (c.as_str(), SQL::qualified(&alias, c)))
            .collect();
        let Some(object) = dialect.json_object(&alias, pairs) else {
            sieve_trace_skip!(AXIS, name, "relation declares no columns");
            continue;
        };

        let mut select = relation::correlated(scope, descriptor, &alias);
        if descriptor.is_to_many() {
            select = select.column(dialect.json_array_agg(object));
        } else {
            select = select.column(object).limit(1);
        }
        let value = dialect.json_to_text(select.to_sql(dialect).parens());
        columns.push(value.alias(descriptor.property_name.clone()));
    }
    columns
}
