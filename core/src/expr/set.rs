//! Set operations (IN, NOT IN, EXISTS, IN subquery).

use crate::param::Param;
use crate::predicate::Predicate;
use crate::select::Select;
use crate::sql::SQL;

/// `expr IN (params)`. `None` when there is nothing to match against.
pub fn in_list(expr: SQL, params: Vec<Param>) -> Option<Predicate> {
    (!params.is_empty()).then(|| Predicate::InList {
        expr,
        negated: false,
        params,
    })
}

/// `expr NOT IN (params)`. `None` when there is nothing to exclude.
pub fn not_in_list(expr: SQL, params: Vec<Param>) -> Option<Predicate> {
    (!params.is_empty()).then(|| Predicate::InList {
        expr,
        negated: true,
        params,
    })
}

/// Correlated existence check.
pub fn exists(select: Select) -> Predicate {
    Predicate::Exists(Box::new(select))
}

/// Membership of `expr` in the single-column result of `subquery`.
pub fn in_subquery(expr: SQL, subquery: Select) -> Predicate {
    Predicate::InSubquery {
        expr,
        subquery: Box::new(subquery),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn empty_lists_are_inert() {
        assert!(in_list(SQL::ident("a"), Vec::new()).is_none());
        assert!(not_in_list(SQL::ident("a"), Vec::new()).is_none());
        assert!(in_list(SQL::ident("a"), vec![Param::new("p", Value::Null)]).is_some());
    }
}
