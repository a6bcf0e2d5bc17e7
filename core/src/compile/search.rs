//! Free-text search across root fields.

use super::Scope;
use crate::expr::{contains_pattern, matches, text_ref};
use crate::param::ParamBinder;
use crate::path::FieldPath;
use crate::predicate::Predicate;
use crate::request::FilterRequest;
use crate::sieve_trace_skip;

const AXIS: &str = "search";

/// One case-insensitive partial match per `search_by` field, ORed.
pub(super) fn compile(scope: &Scope<'_>, binder: &mut ParamBinder, request: &FilterRequest) -> Option<Predicate> {
    let term = request.search.as_deref().filter(|s| !s.is_empty())?;

    let mut clauses = Vec::new();
    for (i, field) in request.search_by.iter().enumerate() {
        let Some(path) = FieldPath::root(field) else {
            sieve_trace_skip!(AXIS, field, "invalid field path");
            continue;
        };
        let pattern = binder.bind(AXIS, i, contains_pattern(term));
        clauses.push(matches(text_ref(scope.dialect(), scope.alias(), &path), pattern));
    }
    Predicate::or(clauses)
}
