//! Typed field paths.
//!
//! Request fields arrive as dotted strings. Each axis parses them once, in the
//! shape that axis accepts, and the compilers match on the variants instead of
//! re-splitting strings.

use compact_str::CompactString;

/// A parsed field reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// `column` on the root entity
    Column { column: CompactString },
    /// `column.key`: a structured sub-field of a root column
    JsonField {
        column: CompactString,
        key: CompactString,
    },
    /// `relation.column` on a related entity
    Relation {
        relation: CompactString,
        column: CompactString,
    },
    /// `relation.column.key`: a structured sub-field on a related entity
    RelationJsonField {
        relation: CompactString,
        column: CompactString,
        key: CompactString,
    },
    /// `parent.column[.key]` on the joined parent entity
    ParentField {
        parent: CompactString,
        column: CompactString,
        key: Option<CompactString>,
    },
}

impl FieldPath {
    /// Parses a root path: `column` or `column.key`.
    ///
    /// ```
    /// use sieve_core::path::FieldPath;
    ///
    /// assert!(matches!(FieldPath::root("status"), Some(FieldPath::Column { .. })));
    /// assert!(matches!(FieldPath::root("tags.label"), Some(FieldPath::JsonField { .. })));
    /// assert_eq!(FieldPath::root("a.b.c"), None);
    /// assert_eq!(FieldPath::root("bad name"), None);
    /// ```
    pub fn root(path: &str) -> Option<Self> {
        match segments(path)?.as_slice() {
            [column] => Some(FieldPath::Column {
                column: (*column).into(),
            }),
            [column, key] => Some(FieldPath::JsonField {
                column: (*column).into(),
                key: (*key).into(),
            }),
            _ => None,
        }
    }

    /// Parses a related path: `relation.column` or `relation.column.key`.
    pub fn relation(path: &str) -> Option<Self> {
        match segments(path)?.as_slice() {
            [relation, column] => Some(FieldPath::Relation {
                relation: (*relation).into(),
                column: (*column).into(),
            }),
            [relation, column, key] => Some(FieldPath::RelationJsonField {
                relation: (*relation).into(),
                column: (*column).into(),
                key: (*key).into(),
            }),
            _ => None,
        }
    }

    /// Parses a parent path: `parent.column` or `parent.column.key`.
    pub fn parent(path: &str) -> Option<Self> {
        match segments(path)?.as_slice() {
            [parent, column] => Some(FieldPath::ParentField {
                parent: (*parent).into(),
                column: (*column).into(),
                key: None,
            }),
            [parent, column, key] => Some(FieldPath::ParentField {
                parent: (*parent).into(),
                column: (*column).into(),
                key: Some((*key).into()),
            }),
            _ => None,
        }
    }

    /// The relation (or parent) segment, if this path leaves the root entity.
    pub fn relation_name(&self) -> Option<&str> {
        match self {
            FieldPath::Column { .. } | FieldPath::JsonField { .. } => None,
            FieldPath::Relation { relation, .. } | FieldPath::RelationJsonField { relation, .. } => {
                Some(relation.as_str())
            }
            FieldPath::ParentField { parent, .. } => Some(parent.as_str()),
        }
    }

    /// The column segment.
    pub fn column(&self) -> &str {
        match self {
            FieldPath::Column { column }
            | FieldPath::JsonField { column, .. }
            | FieldPath::Relation { column, .. }
            | FieldPath::RelationJsonField { column, .. }
            | FieldPath::ParentField { column, .. } => column.as_str(),
        }
    }

    /// The structured sub-field key, if any.
    pub fn json_key(&self) -> Option<&str> {
        match self {
            FieldPath::JsonField { key, .. } | FieldPath::RelationJsonField { key, .. } => {
                Some(key.as_str())
            }
            FieldPath::ParentField { key, .. } => key.as_deref(),
            FieldPath::Column { .. } | FieldPath::Relation { .. } => None,
        }
    }
}

impl core::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(relation) = self.relation_name() {
            write!(f, "{relation}.")?;
        }
        f.write_str(self.column())?;
        if let Some(key) = self.json_key() {
            write!(f, ".{key}")?;
        }
        Ok(())
    }
}

/// Splits on `.` and rejects any segment that is not a plain identifier.
fn segments(path: &str) -> Option<Vec<&str>> {
    let parts: Vec<&str> = path.split('.').collect();
    parts.iter().all(|p| is_identifier(p)).then_some(parts)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
///
/// Every identifier the compiler writes into SQL text, including JSON keys,
/// passes through this check.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
