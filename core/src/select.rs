//! A minimal SELECT model used for the outer query and every subquery the
//! compiler generates.

use compact_str::CompactString;
use sieve_types::Dialect;

use crate::param::Param;
use crate::predicate::Predicate;
use crate::sql::{SQL, SQLChunk, Token};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses `asc`/`desc` in any case.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    const fn token(self) -> Token {
        match self {
            SortDirection::Asc => Token::ASC,
            SortDirection::Desc => Token::DESC,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderTerm {
    pub expr: SQL,
    pub direction: SortDirection,
}

impl OrderTerm {
    pub fn asc(expr: SQL) -> Self {
        Self { expr, direction: SortDirection::Asc }
    }

    pub fn desc(expr: SQL) -> Self {
        Self { expr, direction: SortDirection::Desc }
    }

    pub(crate) fn to_sql(&self) -> SQL {
        self.expr.clone().push(self.direction.token())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Distinct {
    #[default]
    None,
    All,
    /// PostgreSQL `DISTINCT ON (..)`
    On(Vec<SQL>),
}

/// Row source of a FROM or JOIN clause, always aliased.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Table {
        schema: Option<CompactString>,
        table: CompactString,
        alias: CompactString,
    },
    Derived {
        select: Box<Select>,
        alias: CompactString,
    },
}

impl Source {
    pub fn table(schema: Option<&str>, table: &str, alias: &str) -> Self {
        Source::Table {
            schema: schema.map(CompactString::from),
            table: table.into(),
            alias: alias.into(),
        }
    }

    pub fn alias(&self) -> &str {
        match self {
            Source::Table { alias, .. } | Source::Derived { alias, .. } => alias,
        }
    }

    fn to_sql(&self, dialect: Dialect) -> SQL {
        match self {
            Source::Table { schema, table, alias } => {
                SQL::table(schema.as_deref(), table).alias(alias.clone())
            }
            Source::Derived { select, alias } => {
                select.to_sql(dialect).parens().alias(alias.clone())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// `INNER JOIN source ON on`; the only join the compiler emits.
pub struct Join {
    pub source: Source,
    pub on: Predicate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub distinct: Distinct,
    /// Empty renders as `*`.
    pub columns: Vec<SQL>,
    pub from: Source,
    pub joins: Vec<Join>,
    pub filter: Option<Predicate>,
    pub order_by: Vec<OrderTerm>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Select {
    pub fn new(source: Source) -> Self {
        Self {
            distinct: Distinct::None,
            columns: Vec::new(),
            from: source,
            joins: Vec::new(),
            filter: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn column(mut self, column: SQL) -> Self {
        self.columns.push(column);
        self
    }

    pub fn distinct(mut self, distinct: Distinct) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// ANDs `predicate` into the WHERE clause. `None` leaves it unchanged.
    pub fn filter(mut self, predicate: Option<Predicate>) -> Self {
        self.filter = Predicate::and(self.filter.take().into_iter().chain(predicate));
        self
    }

    pub fn order_by(mut self, term: OrderTerm) -> Self {
        self.order_by.push(term);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub(crate) fn collect_params<'p>(&'p self, out: &mut Vec<&'p Param>) {
        for column in &self.columns {
            out.extend(column.params());
        }
        if let Source::Derived { select, .. } = &self.from {
            select.collect_params(out);
        }
        for join in &self.joins {
            if let Source::Derived { select, .. } = &join.source {
                select.collect_params(out);
            }
            out.extend(join.on.params());
        }
        if let Some(filter) = &self.filter {
            out.extend(filter.params());
        }
    }

    pub fn to_sql(&self, dialect: Dialect) -> SQL {
        let mut sql = SQL::token(Token::SELECT);
        match &self.distinct {
            Distinct::None => {}
            Distinct::All => sql.push_mut(Token::DISTINCT),
            Distinct::On(keys) => {
                sql.push_mut(Token::DISTINCT);
                sql.push_mut(Token::ON);
                sql.append_mut(SQL::join(keys.iter().cloned(), Token::COMMA).parens());
            }
        }

        if self.columns.is_empty() {
            sql.push_mut(Token::STAR);
        } else {
            sql.append_mut(SQL::join(self.columns.iter().cloned(), Token::COMMA));
        }

        sql.push_mut(Token::FROM);
        sql.append_mut(self.from.to_sql(dialect));

        for join in &self.joins {
            sql.push_mut(Token::INNER);
            sql.push_mut(Token::JOIN);
            sql.append_mut(join.source.to_sql(dialect));
            sql.push_mut(Token::ON);
            sql.append_mut(join.on.to_sql(dialect));
        }

        if let Some(filter) = &self.filter {
            sql.push_mut(Token::WHERE);
            sql.append_mut(filter.to_sql(dialect));
        }

        if !self.order_by.is_empty() {
            sql.push_mut(Token::ORDER);
            sql.push_mut(Token::BY);
            sql.append_mut(SQL::join(self.order_by.iter().map(OrderTerm::to_sql), Token::COMMA));
        }

        if let Some(limit) = self.limit {
            sql.push_mut(Token::LIMIT);
            sql.push_mut(SQLChunk::Number(limit));
        }
        if let Some(offset) = self.offset {
            sql.push_mut(Token::OFFSET);
            sql.push_mut(SQLChunk::Number(offset));
        }
        sql
    }
}
