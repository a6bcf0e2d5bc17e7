//! Ordering.
//!
//! Structured sub-fields are ordered through a synthetic output column so the
//! ordering expression is part of the DISTINCT select list.

use compact_str::format_compact;

use super::{Scope, paired};
use crate::expr::path_ref;
use crate::path::FieldPath;
use crate::request::FilterRequest;
use crate::select::{OrderTerm, SortDirection};
use crate::sieve_trace_skip;
use crate::sql::SQL;

const AXIS: &str = "sort";

#[derive(Debug, Default)]
pub(super) struct Sort {
    /// Extra output columns, one per structured sort field.
    pub columns: Vec<SQL>,
    pub order_by: Vec<OrderTerm>,
}

pub(super) fn compile(scope: &Scope<'_>, request: &FilterRequest) -> Sort {
    let mut sort = Sort::default();

    for (i, field, direction) in paired(AXIS, &request.sort_by, &request.sort) {
        let Some(direction) = SortDirection::parse(direction) else {
            sieve_trace_skip!(AXIS, field, "invalid sort direction");
            continue;
        };
        let Some(path) = FieldPath::root(field) else {
            sieve_trace_skip!(AXIS, field, "invalid field path");
            continue;
        };

        let expr = path_ref(scope.dialect(), scope.alias(), &path);
        let expr = match path {
            FieldPath::JsonField { .. } => {
                let name = format_compact!("sort_{i}");
                sort.columns.push(expr.alias(name.clone()));
                SQL::ident(name)
            }
            _ => expr,
        };
        sort.order_by.push(OrderTerm { expr, direction });
    }
    sort
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::test_support::{options, user};
    use sieve_types::Dialect;

    fn compile_sort(request: &FilterRequest) -> Sort {
        let entity = user();
        let options = options(Dialect::PostgreSQL);
        let scope = Scope { entity: &entity, options: &options, tenant: "1", parent: None };
        compile(&scope, request)
    }

    #[test]
    fn json_fields_get_a_synthetic_column() {
        let request = FilterRequest::new()
            .sort_by("meta.rank", "desc")
            .sort_by("name", "ASC");
        let sort = compile_sort(&request);

        assert_eq!(sort.columns.len(), 1);
        assert_eq!(
            sort.columns[0].render(Dialect::PostgreSQL).sql,
            r#""t0"."meta" ->> 'rank' AS "sort_0""#
        );
        assert_eq!(sort.order_by[0], OrderTerm::desc(SQL::ident("sort_0")));
        assert_eq!(sort.order_by[1], OrderTerm::asc(SQL::qualified("t0", "name")));
    }

    #[test]
    fn invalid_entries_are_skipped_and_mismatch_is_inert() {
        let request = FilterRequest::new()
            .sort_by("name", "sideways")
            .sort_by("age", "desc");
        let sort = compile_sort(&request);
        assert_eq!(sort.order_by, vec![OrderTerm::desc(SQL::qualified("t0", "age"))]);

        let mut request = FilterRequest::new().sort_by("name", "asc");
        request.sort.push("desc".into());
        assert!(compile_sort(&request).order_by.is_empty());
    }
}
