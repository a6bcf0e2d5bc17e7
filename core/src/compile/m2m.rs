//! Membership filters: the root key must be among the keys of related rows
//! whose column matches one of the supplied values.

use super::filter::combine;
use super::{Scope, paired, relation};
use crate::expr::{column_ref, in_list, in_subquery};
use crate::param::ParamBinder;
use crate::path::FieldPath;
use crate::predicate::Predicate;
use crate::request::FilterRequest;
use crate::sieve_trace_skip;

const AXIS: &str = "filter_m2m";

pub(super) fn compile(scope: &Scope<'_>, binder: &mut ParamBinder, request: &FilterRequest) -> Option<Predicate> {
    let mut clauses = Vec::new();

    for (i, field, values) in paired(AXIS, &request.filter_m2m_by, &request.filter_m2m) {
        let Some(FieldPath::Relation { relation, column }) = FieldPath::relation(field) else {
            sieve_trace_skip!(AXIS, field, "expected relation.column");
            continue;
        };
        let Some(descriptor) = scope.entity.find_relation(&relation) else {
            sieve_trace_skip!(AXIS, field, "unknown relation");
            continue;
        };

        let params = binder.bind_all(AXIS, i, values.iter().cloned());
        let target = column_ref(scope.dialect(), &relation, &column, None);
        let Some(condition) = in_list(target, params) else {
            continue;
        };
        let (root_column, subquery) = relation::membership(scope, descriptor, &relation, condition);
        clauses.push(in_subquery(root_column, subquery));
    }

    combine(request.filter_m2m_condition, clauses)
}
