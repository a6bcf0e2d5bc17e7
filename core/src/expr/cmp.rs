//! Comparison leaves.

use crate::param::Param;
use crate::predicate::{CompareOp, Predicate};
use crate::sql::SQL;

pub fn eq(expr: SQL, param: Param) -> Predicate {
    Predicate::Compare {
        expr,
        op: CompareOp::Eq,
        rhs: SQL::param(param),
    }
}

pub fn gte(expr: SQL, param: Param) -> Predicate {
    Predicate::Compare {
        expr,
        op: CompareOp::Ge,
        rhs: SQL::param(param),
    }
}

pub fn lte(expr: SQL, param: Param) -> Predicate {
    Predicate::Compare {
        expr,
        op: CompareOp::Le,
        rhs: SQL::param(param),
    }
}

/// Column-to-column equality, used for join and correlation conditions.
pub fn columns_eq(left: SQL, right: SQL) -> Predicate {
    Predicate::Compare {
        expr: left,
        op: CompareOp::Eq,
        rhs: right,
    }
}

pub fn is_null(expr: SQL) -> Predicate {
    Predicate::IsNull(expr)
}
