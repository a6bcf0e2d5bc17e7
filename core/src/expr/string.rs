//! Pattern matching.

use sieve_types::Value;

use crate::param::Param;
use crate::predicate::Predicate;
use crate::sql::SQL;

/// Case-insensitive partial match of `expr` against a bound pattern.
///
/// The pattern must already be wrapped, see [`contains_pattern`].
pub fn matches(expr: SQL, pattern: Param) -> Predicate {
    Predicate::Match {
        expr,
        param: pattern,
    }
}

/// `%term%` as a bindable value. `LIKE` wildcards inside `term` are kept.
pub fn contains_pattern(term: &str) -> Value {
    Value::Text(format!("%{term}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_term() {
        assert_eq!(contains_pattern("foo"), Value::from("%foo%"));
    }
}
