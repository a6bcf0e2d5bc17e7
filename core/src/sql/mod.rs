mod chunk;
mod tokens;

pub use chunk::*;
pub use tokens::*;

use core::fmt::Write;

use compact_str::CompactString;
use smallvec::SmallVec;
use sieve_types::{Dialect, Value};

use crate::param::Param;

/// SQL fragment builder with flat chunk storage.
///
/// Uses `SmallVec<[SQLChunk; 8]>` for inline storage of typical SQL fragments
/// without heap allocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SQL {
    pub chunks: SmallVec<[SQLChunk; 8]>,
}

impl SQL {
    // ==================== constructors ====================

    /// Creates an empty SQL fragment
    #[inline]
    pub const fn empty() -> Self {
        Self {
            chunks: SmallVec::new_const(),
        }
    }

    /// Creates SQL with a single token
    #[inline]
    pub fn token(t: Token) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Token(t)],
        }
    }

    /// Creates SQL with a quoted identifier
    #[inline]
    pub fn ident(name: impl Into<CompactString>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Ident(name.into())],
        }
    }

    /// Creates SQL with raw text (unquoted)
    #[inline]
    pub fn raw(text: impl Into<CompactString>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Raw(text.into())],
        }
    }

    /// Creates SQL with a single-quoted string literal.
    ///
    /// Only used for text the compiler controls (JSON paths built from
    /// validated keys, JSON object keys from the schema registry); request
    /// values always go through [`SQL::param`].
    pub fn string_literal(text: &str) -> Self {
        let mut quoted = CompactString::with_capacity(text.len() + 2);
        quoted.push('\'');
        for c in text.chars() {
            if c == '\'' {
                quoted.push('\'');
            }
            quoted.push(c);
        }
        quoted.push('\'');
        Self::raw(quoted)
    }

    /// Creates SQL with a single unsigned integer literal.
    #[inline]
    pub fn number(value: u64) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Number(value)],
        }
    }

    /// Creates SQL with a single parameter
    #[inline]
    pub fn param(param: Param) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Param(param)],
        }
    }

    /// Creates a qualified column reference: "alias"."column"
    #[inline]
    pub fn qualified(alias: &str, column: &str) -> Self {
        Self {
            chunks: smallvec::smallvec![
                SQLChunk::ident(alias),
                SQLChunk::Token(Token::DOT),
                SQLChunk::ident(column),
            ],
        }
    }

    /// Creates a table reference, optionally schema-qualified: "schema"."table"
    pub fn table(schema: Option<&str>, table: &str) -> Self {
        match schema {
            Some(schema) => Self::qualified(schema, table),
            None => Self::ident(table),
        }
    }

    /// Creates SQL for a function call: NAME(args)
    #[inline]
    pub fn func(name: &'static str, args: SQL) -> Self {
        SQL::raw(name)
            .push(Token::LPAREN)
            .append(args)
            .push(Token::RPAREN)
    }

    // ==================== builder methods ====================

    /// Append another SQL fragment (flat extend)
    #[inline]
    pub fn append(mut self, other: impl Into<SQL>) -> Self {
        let other = other.into();

        if self.chunks.is_empty() {
            return other;
        }
        if other.chunks.is_empty() {
            return self;
        }

        self.chunks.extend(other.chunks);
        self
    }

    #[inline]
    pub fn append_mut(&mut self, other: impl Into<SQL>) {
        let other = other.into();

        if self.chunks.is_empty() {
            self.chunks = other.chunks;
            return;
        }
        self.chunks.extend(other.chunks);
    }

    /// Push a single chunk
    #[inline]
    pub fn push(mut self, chunk: impl Into<SQLChunk>) -> Self {
        self.chunks.push(chunk.into());
        self
    }

    #[inline]
    pub fn push_mut(&mut self, chunk: impl Into<SQLChunk>) {
        self.chunks.push(chunk.into());
    }

    // ==================== combinators ====================

    /// Joins multiple SQL fragments with a separator
    pub fn join<I>(sqls: I, separator: Token) -> SQL
    where
        I: IntoIterator<Item = SQL>,
    {
        let mut iter = sqls.into_iter();
        let Some(mut result) = iter.next() else {
            return SQL::empty();
        };
        for item in iter {
            result.chunks.push(SQLChunk::Token(separator));
            result.chunks.extend(item.chunks);
        }
        result
    }

    /// Wrap in parentheses: (self)
    #[inline]
    pub fn parens(self) -> Self {
        SQL::token(Token::LPAREN).append(self).push(Token::RPAREN)
    }

    /// Creates an aliased version: self AS "name"
    pub fn alias(self, name: impl Into<CompactString>) -> SQL {
        self.push(Token::AS).push(SQLChunk::Ident(name.into()))
    }

    /// Creates a comma-separated list of parameters.
    pub fn param_list<I>(params: I) -> Self
    where
        I: IntoIterator<Item = Param>,
    {
        let iter = params.into_iter();
        let (lower, _) = iter.size_hint();
        let mut chunks = SmallVec::with_capacity(lower.saturating_mul(2));
        for (i, p) in iter.enumerate() {
            if i > 0 {
                chunks.push(SQLChunk::Token(Token::COMMA));
            }
            chunks.push(SQLChunk::Param(p));
        }
        SQL { chunks }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    // ==================== output methods ====================

    /// Returns an iterator over the parameters in rendering order.
    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.chunks.iter().filter_map(|chunk| match chunk {
            SQLChunk::Param(param) => Some(param),
            _ => None,
        })
    }

    /// Renders the SQL text for `dialect` and collects parameters in a single pass.
    ///
    /// Placeholders are `$1, $2, ...` for PostgreSQL, `:name` for SQLite and
    /// `?` for MySQL; the returned parameters are in placeholder order.
    pub fn render(&self, dialect: Dialect) -> Statement {
        let mut sql = String::with_capacity(self.chunks.len().saturating_mul(8).max(128));
        let mut params = Vec::new();

        for (i, chunk) in self.chunks.iter().enumerate() {
            match chunk {
                SQLChunk::Param(param) => {
                    params.push(param.clone());
                    write_placeholder(&mut sql, dialect, params.len(), &param.name);
                }
                _ => chunk.write(&mut sql, dialect),
            }

            if self.needs_space(i) {
                sql.push(' ');
            }
        }

        Statement {
            sql,
            params,
            dialect,
        }
    }

    /// Simplified spacing logic
    fn needs_space(&self, index: usize) -> bool {
        let Some(next) = self.chunks.get(index + 1) else {
            return false;
        };
        chunk_needs_space(&self.chunks[index], next)
    }
}

fn write_placeholder(buf: &mut String, dialect: Dialect, index: usize, name: &str) {
    match dialect {
        Dialect::PostgreSQL => {
            let _ = write!(buf, "${index}");
        }
        Dialect::SQLite => {
            buf.push(':');
            buf.push_str(name);
        }
        Dialect::MySQL => buf.push('?'),
    }
}

/// Canonical spacing logic for SQL chunk rendering.
pub(crate) fn chunk_needs_space(current: &SQLChunk, next: &SQLChunk) -> bool {
    match (current, next) {
        // No space before closing/separator punctuation
        (_, SQLChunk::Token(Token::RPAREN | Token::COMMA | Token::DOT)) => false,
        // No space after opening punctuation
        (SQLChunk::Token(Token::LPAREN | Token::DOT), _) => false,
        // Space after comma
        (SQLChunk::Token(Token::COMMA), _) => true,
        // Function call: raw name directly followed by its argument list
        (SQLChunk::Raw(_), SQLChunk::Token(Token::LPAREN)) => false,
        // Space around comparison operators
        (SQLChunk::Token(t), _) if t.is_operator() => true,
        (_, SQLChunk::Token(t)) if t.is_operator() => true,
        // Space after closing paren if next is word-like (e.g., ") FROM")
        (SQLChunk::Token(Token::RPAREN), next) => next.is_word_like(),
        // Space before opening paren if preceded by word-like (e.g., "IN (")
        (current, SQLChunk::Token(Token::LPAREN)) => current.is_word_like(),
        // Space between all word-like chunks
        _ => current.is_word_like() && next.is_word_like(),
    }
}

/// A rendered, executable statement: SQL text plus parameters in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Param>,
    pub dialect: Dialect,
}

impl Statement {
    /// Parameter values in placeholder order, for positional binding.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.params.iter().map(|p| &p.value)
    }

    /// `(name, value)` pairs for drivers that bind by name.
    pub fn named_params(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.params.iter().map(|p| (p.name.as_str(), &p.value))
    }
}

impl core::fmt::Display for Statement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.sql)
    }
}

// ==================== trait implementations ====================

impl From<Token> for SQL {
    fn from(value: Token) -> Self {
        SQL::token(value)
    }
}

impl From<Param> for SQL {
    fn from(value: Param) -> Self {
        SQL::param(value)
    }
}

impl FromIterator<SQLChunk> for SQL {
    fn from_iter<I: IntoIterator<Item = SQLChunk>>(iter: I) -> Self {
        Self {
            chunks: SmallVec::from_iter(iter),
        }
    }
}

impl IntoIterator for SQL {
    type Item = SQLChunk;
    type IntoIter = smallvec::IntoIter<[SQLChunk; 8]>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, v: &str) -> Param {
        Param::new(name, Value::from(v))
    }

    #[test]
    fn qualified_columns_render_without_spaces() {
        let sql = SQL::qualified("t0", "status");
        assert_eq!(sql.render(Dialect::SQLite).sql, r#""t0"."status""#);
        assert_eq!(sql.render(Dialect::MySQL).sql, "`t0`.`status`");
    }

    #[test]
    fn in_list_spacing() {
        let sql = SQL::qualified("t0", "status")
            .push(Token::IN)
            .append(SQL::param_list([p("a", "x"), p("b", "y")]).parens());
        assert_eq!(
            sql.render(Dialect::SQLite).sql,
            r#""t0"."status" IN (:a, :b)"#
        );
    }

    #[test]
    fn postgres_placeholders_are_numbered_in_order() {
        let sql = SQL::qualified("t0", "a")
            .push(Token::EQ)
            .append(SQL::param(p("first", "1")))
            .push(Token::AND)
            .append(SQL::qualified("t0", "b"))
            .push(Token::GE)
            .append(SQL::param(p("second", "2")));
        let stmt = sql.render(Dialect::PostgreSQL);

        assert_eq!(stmt.sql, r#""t0"."a" = $1 AND "t0"."b" >= $2"#);
        let names: Vec<_> = stmt.named_params().map(|(n, _)| n).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn function_calls_hug_their_arguments() {
        let sql = SQL::func("COUNT", SQL::token(Token::STAR)).alias("total");
        assert_eq!(sql.render(Dialect::SQLite).sql, r#"COUNT(*) AS "total""#);
    }

    #[test]
    fn mysql_uses_question_marks() {
        let sql = SQL::raw("x").push(Token::EQ).append(SQL::param(p("n", "v")));
        assert_eq!(sql.render(Dialect::MySQL).sql, "x = ?");
    }

    #[test]
    fn string_literals_escape_quotes() {
        let sql = SQL::string_literal("it's");
        assert_eq!(sql.render(Dialect::SQLite).sql, "'it''s'");
    }

    #[test]
    fn join_inserts_separator_between_items() {
        let sql = SQL::join([SQL::raw("a"), SQL::raw("b"), SQL::raw("c")], Token::COMMA);
        assert_eq!(sql.render(Dialect::SQLite).sql, "a, b, c");
        assert!(SQL::join(Vec::new(), Token::AND).is_empty());
    }
}
