//! Correlated access to related tables.

use compact_str::{CompactString, format_compact};

use super::Scope;
use crate::expr::{columns_eq, is_null};
use crate::predicate::Predicate;
use crate::schema::{RelationDescriptor, RelationKind};
use crate::select::{Join, Select, Source};
use crate::sql::SQL;

/// Alias of the junction table for a relation aliased `alias`.
fn junction_alias(alias: &str) -> CompactString {
    format_compact!("{alias}_j")
}

/// `SELECT * FROM related AS alias [JOIN junction] WHERE <correlated to root>`,
/// excluding soft-deleted related rows. Callers set the columns and add their
/// own conditions.
pub(super) fn correlated(scope: &Scope<'_>, relation: &RelationDescriptor, alias: &str) -> Select {
    let root = scope.alias();
    let entity = scope.entity;
    let source = Source::table(relation.schema.as_deref(), &relation.table_name, alias);

    let select = match &relation.kind {
        RelationKind::HasMany => Select::new(source).filter(Some(columns_eq(
            SQL::qualified(alias, &relation.foreign_key_column),
            SQL::qualified(root, &entity.primary_key),
        ))),
        RelationKind::BelongsTo { target_key } => Select::new(source).filter(Some(columns_eq(
            SQL::qualified(alias, target_key),
            SQL::qualified(root, &relation.foreign_key_column),
        ))),
        RelationKind::ManyToMany {
            junction_table,
            junction_schema,
            target_column,
            target_key,
        } => {
            let junction = junction_alias(alias);
            Select::new(source)
                .join(Join {
                    source: Source::table(junction_schema.as_deref(), junction_table, &junction),
                    on: columns_eq(
                        SQL::qualified(&junction, target_column),
                        SQL::qualified(alias, target_key),
                    ),
                })
                .filter(Some(columns_eq(
                    SQL::qualified(&junction, &relation.foreign_key_column),
                    SQL::qualified(root, &entity.primary_key),
                )))
        }
    };
    select.filter(not_deleted(relation, alias))
}

/// Uncorrelated membership subquery: selects the key the root is matched on,
/// and returns it with the root column it must be compared against.
///
/// The subquery is aliased `alias`; `condition` restricts the related rows.
pub(super) fn membership(
    scope: &Scope<'_>,
    relation: &RelationDescriptor,
    alias: &str,
    condition: Predicate,
) -> (SQL, Select) {
    let root = scope.alias();
    let entity = scope.entity;
    let source = Source::table(relation.schema.as_deref(), &relation.table_name, alias);

    let (root_column, select) = match &relation.kind {
        RelationKind::HasMany => (
            SQL::qualified(root, &entity.primary_key),
            Select::new(source).column(SQL::qualified(alias, &relation.foreign_key_column)),
        ),
        RelationKind::BelongsTo { target_key } => (
            SQL::qualified(root, &relation.foreign_key_column),
            Select::new(source).column(SQL::qualified(alias, target_key)),
        ),
        RelationKind::ManyToMany {
            junction_table,
            junction_schema,
            target_column,
            target_key,
        } => {
            let junction = junction_alias(alias);
            (
                SQL::qualified(root, &entity.primary_key),
                Select::new(Source::table(junction_schema.as_deref(), junction_table, &junction))
                    .column(SQL::qualified(&junction, &relation.foreign_key_column))
                    .join(Join {
                        source,
                        on: columns_eq(
                            SQL::qualified(alias, target_key),
                            SQL::qualified(&junction, target_column),
                        ),
                    }),
            )
        }
    };
    let select = select
        .filter(Some(condition))
        .filter(not_deleted(relation, alias));
    (root_column, select)
}

fn not_deleted(relation: &RelationDescriptor, alias: &str) -> Option<Predicate> {
    relation
        .soft_delete_column
        .as_deref()
        .map(|column| is_null(SQL::qualified(alias, column)))
}
