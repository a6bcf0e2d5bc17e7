//! `start`/`end` bounds.

use super::Scope;
use super::filter::combine;
use crate::expr::{gte, lte, path_ref};
use crate::param::{Param, ParamBinder};
use crate::path::FieldPath;
use crate::predicate::Predicate;
use crate::request::FilterRequest;
use crate::sieve_trace_skip;
use crate::sql::SQL;

type Bound = fn(SQL, Param) -> Predicate;

/// `start_by >= start` and `end_by <= end`, combined by
/// `start_and_end_condition` when both are present. An OR of the two bounds
/// is kept as requested even though it admits open ranges.
pub(super) fn compile(scope: &Scope<'_>, binder: &mut ParamBinder, request: &FilterRequest) -> Option<Predicate> {
    let sides: [(&str, Option<&str>, _, Bound); 2] = [
        ("start", request.start_by.as_deref(), request.start.as_ref(), gte),
        ("end", request.end_by.as_deref(), request.end.as_ref(), lte),
    ];

    let mut bounds = Vec::with_capacity(2);
    for (axis, field, value, bound) in sides {
        let (Some(field), Some(value)) = (field, value) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let Some(path) = FieldPath::root(field) else {
            sieve_trace_skip!(axis, field, "invalid field path");
            continue;
        };
        let param = binder.bind(axis, 0, value.clone());
        bounds.push(bound(path_ref(scope.dialect(), scope.alias(), &path), param));
    }

    combine(request.start_and_end_condition, bounds)
}
