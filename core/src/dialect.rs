//! Dialect type re-exported from sieve-types with core-specific extensions.

use crate::sql::{SQL, Token};

/// Re-export the unified Dialect enum from sieve-types
pub use sieve_types::Dialect;

/// Extension trait for dialect-specific expression rendering.
///
/// Everything here returns plain [`SQL`] fragments; none of it binds values.
pub trait DialectExt {
    /// Extracts `key` from the document stored in `column` as a scalar text value.
    ///
    /// - PostgreSQL: `col ->> 'key'`
    /// - SQLite: `json_extract(col, '$.key')`
    /// - MySQL: `JSON_UNQUOTE(JSON_EXTRACT(col, '$.key'))`
    fn json_extract(&self, column: SQL, key: &str) -> SQL;

    /// Casts an expression to the dialect's text type.
    fn text_cast(&self, expr: SQL) -> SQL;

    /// Case-insensitive `LIKE` of `expr` against `pattern`.
    ///
    /// PostgreSQL has `ILIKE`; elsewhere both sides are lowered.
    fn case_insensitive_like(&self, expr: SQL, pattern: SQL) -> SQL;

    /// Aggregates `object` rows into a JSON array, `[]` when there are none.
    fn json_array_agg(&self, object: SQL) -> SQL;

    /// Builds a JSON object from `(key, value)` pairs, or from the whole row
    /// aliased `alias` when the dialect can and `pairs` is empty.
    fn json_object(&self, alias: &str, pairs: Vec<(&str, SQL)>) -> Option<SQL>;

    /// Makes a JSON expression comparable under `DISTINCT`.
    fn json_to_text(&self, expr: SQL) -> SQL;
}

impl DialectExt for Dialect {
    fn json_extract(&self, column: SQL, key: &str) -> SQL {
        match self {
            Dialect::PostgreSQL => column
                .push(crate::sql::SQLChunk::raw("->>"))
                .append(SQL::string_literal(key)),
            Dialect::SQLite => SQL::func(
                "json_extract",
                column
                    .push(Token::COMMA)
                    .append(SQL::string_literal(&format!("$.{key}"))),
            ),
            Dialect::MySQL => SQL::func(
                "JSON_UNQUOTE",
                SQL::func(
                    "JSON_EXTRACT",
                    column
                        .push(Token::COMMA)
                        .append(SQL::string_literal(&format!("$.{key}"))),
                ),
            ),
        }
    }

    fn text_cast(&self, expr: SQL) -> SQL {
        let target = match self {
            Dialect::MySQL => "CHAR",
            Dialect::PostgreSQL | Dialect::SQLite => "TEXT",
        };
        SQL::func("CAST", expr.push(Token::AS).append(SQL::raw(target)))
    }

    fn case_insensitive_like(&self, expr: SQL, pattern: SQL) -> SQL {
        match self {
            Dialect::PostgreSQL => expr.push(Token::ILIKE).append(pattern),
            Dialect::SQLite | Dialect::MySQL => SQL::func("LOWER", expr)
                .push(Token::LIKE)
                .append(SQL::func("LOWER", pattern)),
        }
    }

    fn json_array_agg(&self, object: SQL) -> SQL {
        match self {
            Dialect::PostgreSQL => SQL::func(
                "COALESCE",
                SQL::func("json_agg", object)
                    .push(Token::COMMA)
                    .append(SQL::string_literal("[]")),
            ),
            Dialect::SQLite => SQL::func("json_group_array", object),
            Dialect::MySQL => SQL::func(
                "COALESCE",
                SQL::func("JSON_ARRAYAGG", object)
                    .push(Token::COMMA)
                    .append(SQL::func("JSON_ARRAY", SQL::empty())),
            ),
        }
    }

    fn json_object(&self, alias: &str, pairs: Vec<(&str, SQL)>) -> Option<SQL> {
        if pairs.is_empty() {
            return match self {
                Dialect::PostgreSQL => Some(SQL::func("row_to_json", SQL::ident(alias))),
                Dialect::SQLite | Dialect::MySQL => None,
            };
        }
        let name = match self {
            Dialect::PostgreSQL => "json_build_object",
            Dialect::SQLite => "json_object",
            Dialect::MySQL => "JSON_OBJECT",
        };
        let args = SQL::join(
            pairs.into_iter().map(|(key, value)| {
                SQL::string_literal(key).push(Token::COMMA).append(value)
            }),
            Token::COMMA,
        );
        Some(SQL::func(name, args))
    }

    fn json_to_text(&self, expr: SQL) -> SQL {
        match self {
            // json has no equality operator, so DISTINCT needs text
            Dialect::PostgreSQL => self.text_cast(expr),
            Dialect::SQLite | Dialect::MySQL => expr,
        }
    }
}
