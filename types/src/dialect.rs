//! Target SQL dialect
//!
//! The compiler renders one query description into dialect-specific text. Every
//! decision that differs between engines (quoting, placeholders, structured
//! field extraction) dispatches on this enum.

/// SQL dialect for database-specific rendering
///
/// # Examples
///
/// ```
/// use sieve_types::Dialect;
///
/// assert!(Dialect::PostgreSQL.supports_distinct_on());
/// assert!(!Dialect::SQLite.supports_distinct_on());
/// assert_eq!(Dialect::MySQL.ident_quote(), '`');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// SQLite - uses `:name` placeholders, executed through rusqlite
    #[default]
    SQLite,

    /// PostgreSQL - uses `$1, $2, ...` numbered placeholders
    #[cfg_attr(feature = "serde", serde(alias = "postgres", alias = "pg"))]
    PostgreSQL,

    /// MySQL - uses `?` positional placeholders
    MySQL,
}

impl Dialect {
    /// Whether one row per group can be picked with `SELECT DISTINCT ON (...)`.
    ///
    /// Elsewhere the group compiler falls back to `ROW_NUMBER()`.
    #[inline]
    #[must_use]
    pub const fn supports_distinct_on(&self) -> bool {
        matches!(self, Dialect::PostgreSQL)
    }

    /// Quote character for identifiers.
    #[inline]
    #[must_use]
    pub const fn ident_quote(&self) -> char {
        match self {
            Dialect::MySQL => '`',
            Dialect::SQLite | Dialect::PostgreSQL => '"',
        }
    }

    /// Parse a dialect from a string (case-insensitive)
    ///
    /// Accepts `"sqlite"`, `"mysql"` and `"postgresql"` with its aliases
    /// `"postgres"` and `"pg"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sieve_types::Dialect;
    ///
    /// assert_eq!(Dialect::parse("sqlite"), Some(Dialect::SQLite));
    /// assert_eq!(Dialect::parse("postgres"), Some(Dialect::PostgreSQL));
    /// assert_eq!(Dialect::parse("pg"), Some(Dialect::PostgreSQL));
    /// assert_eq!(Dialect::parse("unknown"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("sqlite") {
            Some(Dialect::SQLite)
        } else if s.eq_ignore_ascii_case("postgresql")
            || s.eq_ignore_ascii_case("postgres")
            || s.eq_ignore_ascii_case("pg")
        {
            Some(Dialect::PostgreSQL)
        } else if s.eq_ignore_ascii_case("mysql") {
            Some(Dialect::MySQL)
        } else {
            None
        }
    }

    /// Get the dialect name as a lowercase string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dialect::SQLite => "sqlite",
            Dialect::PostgreSQL => "postgresql",
            Dialect::MySQL => "mysql",
        }
    }
}

impl core::fmt::Display for Dialect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::parse(s).ok_or(DialectParseError)
    }
}

/// Error returned when parsing an unknown dialect string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectParseError;

impl core::fmt::Display for DialectParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown dialect")
    }
}

impl std::error::Error for DialectParseError {}
