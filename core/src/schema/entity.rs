use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use super::{RelationDescriptor, RelationKind, config_error};
use crate::error::Result;
use crate::path::is_identifier;

fn default_primary_key() -> CompactString {
    CompactString::const_new("id")
}

/// Table-level metadata for one filterable entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMeta {
    pub name: CompactString,
    pub table: CompactString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<CompactString>,
    #[serde(default = "default_primary_key")]
    pub primary_key: CompactString,
    /// Column holding the tenant identifier. Entities without one are never
    /// tenant scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_column: Option<CompactString>,
    /// Nullable timestamp column; rows with a non-null value are deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft_delete_column: Option<CompactString>,
    /// Name of a `belongs_to` relation that designates the parent entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<CompactString>,
    #[serde(default)]
    pub relations: Vec<RelationDescriptor>,
}

impl EntityMeta {
    pub fn new(name: impl Into<CompactString>, table: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            schema: None,
            primary_key: default_primary_key(),
            tenant_column: None,
            soft_delete_column: None,
            parent: None,
            relations: Vec::new(),
        }
    }

    pub fn schema(mut self, schema: impl Into<CompactString>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn primary_key(mut self, column: impl Into<CompactString>) -> Self {
        self.primary_key = column.into();
        self
    }

    pub fn tenant_column(mut self, column: impl Into<CompactString>) -> Self {
        self.tenant_column = Some(column.into());
        self
    }

    pub fn soft_delete(mut self, column: impl Into<CompactString>) -> Self {
        self.soft_delete_column = Some(column.into());
        self
    }

    pub fn parent(mut self, relation: impl Into<CompactString>) -> Self {
        self.parent = Some(relation.into());
        self
    }

    pub fn relation(mut self, relation: RelationDescriptor) -> Self {
        self.relations.push(relation);
        self
    }

    /// Looks up a relation by its property name.
    pub fn find_relation(&self, name: &str) -> Option<&RelationDescriptor> {
        self.relations.iter().find(|r| r.property_name == name)
    }

    /// The relation designated as parent, if it exists and is `belongs_to`.
    pub fn parent_relation(&self) -> Option<&RelationDescriptor> {
        let name = self.parent.as_deref()?;
        self.find_relation(name)
            .filter(|r| matches!(r.kind, RelationKind::BelongsTo { .. }))
    }

    pub fn validate(&self) -> Result<()> {
        let columns = [Some(&self.table), Some(&self.primary_key)]
            .into_iter()
            .chain([
                self.schema.as_ref(),
                self.tenant_column.as_ref(),
                self.soft_delete_column.as_ref(),
            ]);
        for ident in columns.flatten() {
            if !is_identifier(ident) {
                return Err(config_error(&self.name, format_args!("`{ident}` is not a valid identifier")));
            }
        }

        for (i, relation) in self.relations.iter().enumerate() {
            relation.validate(&self.name)?;
            if self.relations[..i]
                .iter()
                .any(|r| r.property_name == relation.property_name)
            {
                return Err(config_error(
                    &self.name,
                    format_args!("relation `{}` is declared twice", relation.property_name),
                ));
            }
        }

        if let Some(parent) = &self.parent {
            if self.parent_relation().is_none() {
                return Err(config_error(
                    &self.name,
                    format_args!("parent `{parent}` must name a belongs_to relation"),
                ));
            }
        }
        Ok(())
    }
}
