//! Immutable predicate tree produced by the compile stages.
//!
//! Each stage returns `Option<Predicate>`; `None` is an inert axis. The tree
//! is rendered to [`SQL`] only once, when a statement is built, so stages can
//! be tested by comparing trees.

use sieve_types::Dialect;

use crate::dialect::DialectExt;
use crate::param::Param;
use crate::select::Select;
use crate::sql::{SQL, Token};

/// Comparison operator of a [`Predicate::Compare`] leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ge,
    Le,
}

impl CompareOp {
    const fn token(self) -> Token {
        match self {
            CompareOp::Eq => Token::EQ,
            CompareOp::Ge => Token::GE,
            CompareOp::Le => Token::LE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    /// `expr op rhs`, where `rhs` is a parameter or a column reference.
    Compare { expr: SQL, op: CompareOp, rhs: SQL },
    /// `expr [NOT] IN (params)`; never built with an empty list.
    InList {
        expr: SQL,
        negated: bool,
        params: Vec<Param>,
    },
    /// Case-insensitive partial match against a bound pattern.
    Match { expr: SQL, param: Param },
    IsNull(SQL),
    Exists(Box<Select>),
    InSubquery { expr: SQL, subquery: Box<Select> },
}

impl Predicate {
    /// Conjunction of `predicates`, flattening nested conjunctions.
    ///
    /// Returns `None` when nothing is left, and the sole predicate unwrapped
    /// when only one is.
    pub fn and<I>(predicates: I) -> Option<Predicate>
    where
        I: IntoIterator<Item = Predicate>,
    {
        let mut items = Vec::new();
        for predicate in predicates {
            match predicate {
                Predicate::And(inner) => items.extend(inner),
                other => items.push(other),
            }
        }
        collapse(items, Predicate::And)
    }

    /// Disjunction of `predicates`, flattening nested disjunctions.
    pub fn or<I>(predicates: I) -> Option<Predicate>
    where
        I: IntoIterator<Item = Predicate>,
    {
        let mut items = Vec::new();
        for predicate in predicates {
            match predicate {
                Predicate::Or(inner) => items.extend(inner),
                other => items.push(other),
            }
        }
        collapse(items, Predicate::Or)
    }

    /// Every parameter in the tree, in rendering order.
    pub fn params(&self) -> Vec<&Param> {
        let mut out = Vec::new();
        self.collect_params(&mut out);
        out
    }

    fn collect_params<'p>(&'p self, out: &mut Vec<&'p Param>) {
        match self {
            Predicate::And(items) | Predicate::Or(items) => {
                for item in items {
                    item.collect_params(out);
                }
            }
            Predicate::Compare { expr, rhs, .. } => {
                out.extend(expr.params());
                out.extend(rhs.params());
            }
            Predicate::InList { expr, params, .. } => {
                out.extend(expr.params());
                out.extend(params.iter());
            }
            Predicate::Match { expr, param } => {
                out.extend(expr.params());
                out.push(param);
            }
            Predicate::IsNull(expr) => out.extend(expr.params()),
            Predicate::Exists(select) => select.collect_params(out),
            Predicate::InSubquery { expr, subquery } => {
                out.extend(expr.params());
                subquery.collect_params(out);
            }
        }
    }

    /// Renders the predicate. Compound children are parenthesised; the
    /// outermost node is not.
    pub fn to_sql(&self, dialect: Dialect) -> SQL {
        match self {
            Predicate::And(items) => join(items, Token::AND, dialect),
            Predicate::Or(items) => join(items, Token::OR, dialect),
            Predicate::Compare { expr, op, rhs } => {
                expr.clone().push(op.token()).append(rhs.clone())
            }
            Predicate::InList {
                expr,
                negated,
                params,
            } => {
                let mut sql = expr.clone();
                if *negated {
                    sql.push_mut(Token::NOT);
                }
                sql.push(Token::IN)
                    .append(SQL::param_list(params.iter().cloned()).parens())
            }
            Predicate::Match { expr, param } => {
                dialect.case_insensitive_like(expr.clone(), SQL::param(param.clone()))
            }
            Predicate::IsNull(expr) => expr.clone().push(Token::IS).push(Token::NULL),
            Predicate::Exists(select) => SQL::token(Token::EXISTS).append(select.to_sql(dialect).parens()),
            Predicate::InSubquery { expr, subquery } => expr
                .clone()
                .push(Token::IN)
                .append(subquery.to_sql(dialect).parens()),
        }
    }

    fn to_nested_sql(&self, dialect: Dialect) -> SQL {
        match self {
            Predicate::And(_) | Predicate::Or(_) => self.to_sql(dialect).parens(),
            _ => self.to_sql(dialect),
        }
    }
}

fn collapse(mut items: Vec<Predicate>, wrap: fn(Vec<Predicate>) -> Predicate) -> Option<Predicate> {
    match items.len() {
        0 => None,
        1 => items.pop(),
        _ => Some(wrap(items)),
    }
}

fn join(items: &[Predicate], separator: Token, dialect: Dialect) -> SQL {
    SQL::join(items.iter().map(|p| p.to_nested_sql(dialect)), separator)
}
