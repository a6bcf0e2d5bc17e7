use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use super::config_error;
use crate::error::Result;
use crate::path::is_identifier;

fn default_target_key() -> CompactString {
    CompactString::const_new("id")
}

/// How a related table is reached from the root entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelationKind {
    /// `related.foreign_key = root.primary_key`
    HasMany,
    /// `related.target_key = root.foreign_key`
    BelongsTo {
        #[serde(default = "default_target_key")]
        target_key: CompactString,
    },
    /// `junction.foreign_key = root.primary_key AND junction.target_column = related.target_key`
    ManyToMany {
        junction_table: CompactString,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        junction_schema: Option<CompactString>,
        target_column: CompactString,
        #[serde(default = "default_target_key")]
        target_key: CompactString,
    },
}

/// A named relation of an entity.
///
/// `foreign_key_column` is interpreted according to [`RelationKind`]: on the
/// related table for `has_many`, on the root table for `belongs_to`, and on
/// the junction table for `many_to_many`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    #[serde(rename = "name")]
    pub property_name: CompactString,
    #[serde(rename = "table")]
    pub table_name: CompactString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<CompactString>,
    #[serde(rename = "foreign_key")]
    pub foreign_key_column: CompactString,
    #[serde(flatten)]
    pub kind: RelationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft_delete_column: Option<CompactString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_column: Option<CompactString>,
    /// Columns exposed when the relation is preloaded. Empty means the whole
    /// row where the dialect can express it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<CompactString>,
}

impl RelationDescriptor {
    fn with_kind(
        name: impl Into<CompactString>,
        table: impl Into<CompactString>,
        foreign_key: impl Into<CompactString>,
        kind: RelationKind,
    ) -> Self {
        Self {
            property_name: name.into(),
            table_name: table.into(),
            schema: None,
            foreign_key_column: foreign_key.into(),
            kind,
            soft_delete_column: None,
            tenant_column: None,
            columns: Vec::new(),
        }
    }

    pub fn has_many(
        name: impl Into<CompactString>,
        table: impl Into<CompactString>,
        foreign_key: impl Into<CompactString>,
    ) -> Self {
        Self::with_kind(name, table, foreign_key, RelationKind::HasMany)
    }

    /// `foreign_key` lives on the root table and references `id` on `table`.
    pub fn belongs_to(
        name: impl Into<CompactString>,
        table: impl Into<CompactString>,
        foreign_key: impl Into<CompactString>,
    ) -> Self {
        Self::with_kind(
            name,
            table,
            foreign_key,
            RelationKind::BelongsTo { target_key: default_target_key() },
        )
    }

    /// `source_column` and `target_column` are both junction columns.
    pub fn many_to_many(
        name: impl Into<CompactString>,
        table: impl Into<CompactString>,
        junction_table: impl Into<CompactString>,
        source_column: impl Into<CompactString>,
        target_column: impl Into<CompactString>,
    ) -> Self {
        Self::with_kind(
            name,
            table,
            source_column,
            RelationKind::ManyToMany {
                junction_table: junction_table.into(),
                junction_schema: None,
                target_column: target_column.into(),
                target_key: default_target_key(),
            },
        )
    }

    pub fn schema(mut self, schema: impl Into<CompactString>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Overrides the referenced key for `belongs_to` and `many_to_many`.
    pub fn target_key(mut self, key: impl Into<CompactString>) -> Self {
        match &mut self.kind {
            RelationKind::BelongsTo { target_key } | RelationKind::ManyToMany { target_key, .. } => {
                *target_key = key.into();
            }
            RelationKind::HasMany => {}
        }
        self
    }

    pub fn soft_delete(mut self, column: impl Into<CompactString>) -> Self {
        self.soft_delete_column = Some(column.into());
        self
    }

    pub fn tenant_column(mut self, column: impl Into<CompactString>) -> Self {
        self.tenant_column = Some(column.into());
        self
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_to_many(&self) -> bool {
        !matches!(self.kind, RelationKind::BelongsTo { .. })
    }

    pub(crate) fn validate(&self, entity: &str) -> Result<()> {
        let mut idents = vec![&self.property_name, &self.table_name, &self.foreign_key_column];
        idents.extend(self.schema.as_ref());
        idents.extend(self.soft_delete_column.as_ref());
        idents.extend(self.tenant_column.as_ref());
        idents.extend(self.columns.iter());
        match &self.kind {
            RelationKind::HasMany => {}
            RelationKind::BelongsTo { target_key } => idents.push(target_key),
            RelationKind::ManyToMany { junction_table, junction_schema, target_column, target_key } => {
                idents.extend([junction_table, target_column, target_key]);
                idents.extend(junction_schema.as_ref());
            }
        }

        match idents.into_iter().find(|ident| !is_identifier(ident)) {
            Some(bad) => Err(config_error(
                entity,
                format_args!("relation `{}`: `{bad}` is not a valid identifier", self.property_name),
            )),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_key_is_ignored_for_has_many() {
        let r = RelationDescriptor::has_many("orders", "orders", "user_id").target_key("uuid");
        assert_eq!(r.kind, RelationKind::HasMany);

        let r = RelationDescriptor::belongs_to("company", "companies", "company_id").target_key("uuid");
        assert_eq!(r.kind, RelationKind::BelongsTo { target_key: "uuid".into() });
        assert!(!r.is_to_many());
    }

    #[test]
    fn serializes_kind_inline() {
        let r = RelationDescriptor::many_to_many("roles", "roles", "user_roles", "user_id", "role_id");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["kind"], "many_to_many");
        assert_eq!(json["junction_table"], "user_roles");
        assert_eq!(json["foreign_key"], "user_id");
    }

    #[test]
    fn validate_checks_junction_columns() {
        let r = RelationDescriptor::many_to_many("roles", "roles", "user roles", "user_id", "role_id");
        assert!(r.validate("user").is_err());
    }
}
