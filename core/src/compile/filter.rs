//! Value-set filters on the root row and on the joined parent.

use sieve_types::Value;

use super::{Scope, paired};
use crate::expr::{in_list, not_in_list, path_ref};
use crate::param::ParamBinder;
use crate::path::FieldPath;
use crate::predicate::Predicate;
use crate::request::{Condition, FilterRequest};
use crate::sieve_trace_skip;
use crate::sql::SQL;

pub(super) const AXIS: &str = "filter";
pub(super) const PARENT_AXIS: &str = "filter_nested_parent";

/// Splits `values` on the exclusion marker and builds
/// `expr IN (included) AND expr NOT IN (excluded)`, either half optional.
pub(super) fn value_set(
    scope: &Scope<'_>,
    binder: &mut ParamBinder,
    axis: &str,
    index: usize,
    expr: SQL,
    values: &[Value],
) -> Option<Predicate> {
    let marker = scope.options.exclusion_marker.as_str();
    let mut include = Vec::new();
    let mut exclude = Vec::new();
    for value in values {
        match value.strip_marker(marker) {
            Some(stripped) => exclude.push(binder.bind(axis, index, stripped)),
            None => include.push(binder.bind(axis, index, value.clone())),
        }
    }
    Predicate::and(in_list(expr.clone(), include).into_iter().chain(not_in_list(expr, exclude)))
}

pub(super) fn combine<I>(condition: Condition, predicates: I) -> Option<Predicate>
where
    I: IntoIterator<Item = Predicate>,
{
    match condition {
        Condition::And => Predicate::and(predicates),
        Condition::Or => Predicate::or(predicates),
    }
}

/// `filter_by`/`filter` on root columns.
pub(super) fn basic(scope: &Scope<'_>, binder: &mut ParamBinder, request: &FilterRequest) -> Option<Predicate> {
    let mut clauses = Vec::new();
    for (i, field, values) in paired(AXIS, &request.filter_by, &request.filter) {
        let Some(path) = FieldPath::root(field) else {
            sieve_trace_skip!(AXIS, field, "invalid field path");
            continue;
        };
        let expr = path_ref(scope.dialect(), scope.alias(), &path);
        clauses.extend(value_set(scope, binder, AXIS, i, expr, values));
    }
    combine(request.filter_condition, clauses)
}

/// `filter_nested_parent_by`/`filter_nested_parent` on the joined parent alias.
pub(super) fn parent(scope: &Scope<'_>, binder: &mut ParamBinder, request: &FilterRequest) -> Option<Predicate> {
    let mut clauses = Vec::new();
    for (i, field, values) in paired(PARENT_AXIS, &request.filter_nested_parent_by, &request.filter_nested_parent) {
        let Some(joined) = scope.parent else {
            sieve_trace_skip!(PARENT_AXIS, field, "no parent join");
            continue;
        };
        let path = match FieldPath::parent(field) {
            Some(path) if path.relation_name() == Some(joined) => path,
            _ => {
                sieve_trace_skip!(PARENT_AXIS, field, "path does not address the joined parent");
                continue;
            }
        };
        let expr = path_ref(scope.dialect(), joined, &path);
        clauses.extend(value_set(scope, binder, PARENT_AXIS, i, expr, values));
    }
    combine(request.filter_nested_parent_condition, clauses)
}
