//! Filters on related rows, compiled into correlated EXISTS subqueries.
//!
//! With AND, every condition on one relation must hold on the same related
//! row, so conditions are grouped into a single EXISTS per relation. With OR,
//! each condition gets its own EXISTS.

use super::filter::{combine, value_set};
use super::{Scope, paired, relation};
use crate::expr::{exists, path_ref};
use crate::param::ParamBinder;
use crate::path::FieldPath;
use crate::predicate::Predicate;
use crate::request::{Condition, FilterRequest};
use crate::schema::RelationDescriptor;
use crate::sieve_trace_skip;
use crate::sql::SQL;

const AXIS: &str = "filter_nested";

pub(super) fn compile(scope: &Scope<'_>, binder: &mut ParamBinder, request: &FilterRequest) -> Option<Predicate> {
    // (relation, conditions on it), in order of first appearance
    let mut groups: Vec<(&RelationDescriptor, Vec<Predicate>)> = Vec::new();

    for (i, field, values) in paired(AXIS, &request.filter_nested_by, &request.filter_nested) {
        let Some(path) = FieldPath::relation(field) else {
            sieve_trace_skip!(AXIS, field, "invalid field path");
            continue;
        };
        let Some(relation) = path.relation_name().and_then(|name| scope.entity.find_relation(name)) else {
            sieve_trace_skip!(AXIS, field, "unknown relation");
            continue;
        };

        let alias = relation.property_name.as_str();
        let expr = path_ref(scope.dialect(), alias, &path);
        let Some(condition) = value_set(scope, binder, AXIS, i, expr, values) else {
            continue;
        };

        match request.filter_nested_condition {
            Condition::And => match groups.iter_mut().find(|(r, _)| r.property_name == relation.property_name) {
                Some((_, conditions)) => conditions.push(condition),
                None => groups.push((relation, vec![condition])),
            },
            Condition::Or => groups.push((relation, vec![condition])),
        }
    }

    let checks = groups.into_iter().map(|(relation, conditions)| {
        let select = relation::correlated(scope, relation, &relation.property_name)
            .column(SQL::number(1))
            .filter(Predicate::and(conditions));
        exists(select)
    });
    combine(request.filter_nested_condition, checks)
}
