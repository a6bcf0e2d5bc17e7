use core::fmt::Write;

use compact_str::CompactString;
use sieve_types::Dialect;

use crate::param::Param;
use crate::sql::tokens::Token;

/// A SQL chunk represents a part of an SQL statement.
///
/// - `Token` - SQL keywords and operators (SELECT, FROM, =, etc.)
/// - `Ident` - Quoted identifiers ("table_name", "column_name")
/// - `Raw` - Unquoted raw SQL text (function names, literals)
/// - `Number` - Unsigned integer literal (LIMIT/OFFSET values)
/// - `Param` - Bind parameter, rendered as a placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SQLChunk {
    /// SQL keywords and operators: SELECT, FROM, WHERE, =, AND, etc.
    Token(Token),

    /// Quoted identifier, rendered with the dialect's quote character
    Ident(CompactString),

    /// Raw SQL text (unquoted) for function names and literals
    Raw(CompactString),

    /// Integer literal
    Number(u64),

    /// Parameter with value, rendered as `$n`, `:name` or `?` depending on dialect
    Param(Param),
}

impl SQLChunk {
    /// Creates a quoted identifier
    #[inline]
    pub fn ident(name: impl Into<CompactString>) -> Self {
        Self::Ident(name.into())
    }

    /// Creates raw SQL text
    #[inline]
    pub fn raw(text: impl Into<CompactString>) -> Self {
        Self::Raw(text.into())
    }

    /// Write chunk content to buffer. Parameters are written by the caller,
    /// which owns placeholder numbering.
    pub(crate) fn write(&self, buf: &mut String, dialect: Dialect) {
        match self {
            SQLChunk::Token(token) => buf.push_str(token.as_str()),
            SQLChunk::Ident(name) => write_ident(buf, name, dialect),
            SQLChunk::Raw(text) => buf.push_str(text),
            SQLChunk::Number(n) => {
                let _ = write!(buf, "{n}");
            }
            SQLChunk::Param(param) => {
                let _ = write!(buf, ":{}", param.name);
            }
        }
    }

    /// Check if this chunk is "word-like" (needs space separation from other word-like chunks)
    #[inline]
    pub(crate) const fn is_word_like(&self) -> bool {
        match self {
            SQLChunk::Token(t) => !t.is_punctuation() && !t.is_operator(),
            SQLChunk::Ident(_) | SQLChunk::Raw(_) | SQLChunk::Number(_) | SQLChunk::Param(_) => {
                true
            }
        }
    }
}

/// Writes `name` as a quoted identifier, doubling any embedded quote character.
pub(crate) fn write_ident(buf: &mut String, name: &str, dialect: Dialect) {
    let quote = dialect.ident_quote();
    buf.push(quote);
    for c in name.chars() {
        if c == quote {
            buf.push(quote);
        }
        buf.push(c);
    }
    buf.push(quote);
}

// ==================== From implementations ====================

impl From<Token> for SQLChunk {
    #[inline]
    fn from(value: Token) -> Self {
        Self::Token(value)
    }
}

impl From<Param> for SQLChunk {
    #[inline]
    fn from(value: Param) -> Self {
        Self::Param(value)
    }
}
