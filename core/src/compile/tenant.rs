//! Tenant scope and soft-delete exclusion, for the root, the parent join and
//! the group subquery.

use sieve_types::Value;

use super::Scope;
use crate::expr::{columns_eq, eq, is_null};
use crate::param::ParamBinder;
use crate::predicate::Predicate;
use crate::schema::{RelationDescriptor, RelationKind};
use crate::select::{Join, Source};
use crate::sql::SQL;

const AXIS: &str = "tenant";

/// Binder index of each tenant parameter.
const ROOT: usize = 0;
const PARENT: usize = 1;

/// Tenant equality and soft-delete exclusion for the entity aliased `alias`.
pub(super) fn scope_predicate(
    scope: &Scope<'_>,
    binder: &mut ParamBinder,
    alias: &str,
    index: usize,
) -> Option<Predicate> {
    let entity = scope.entity;
    let tenant = entity
        .tenant_column
        .as_deref()
        .filter(|_| scope.options.tenant_scope)
        .map(|column| {
            let param = binder.bind(AXIS, index, Value::from(scope.tenant));
            eq(SQL::qualified(alias, column), param)
        });
    let live = entity
        .soft_delete_column
        .as_deref()
        .map(|column| is_null(SQL::qualified(alias, column)));
    Predicate::and(tenant.into_iter().chain(live))
}

pub(super) fn root_scope(scope: &Scope<'_>, binder: &mut ParamBinder) -> Option<Predicate> {
    scope_predicate(scope, binder, scope.alias(), ROOT)
}

/// Inner join to the parent entity, aliased by the relation name, with the
/// parent's own tenant check. `None` unless `relation` is `belongs_to`.
pub(super) fn parent_join(
    scope: &Scope<'_>,
    binder: &mut ParamBinder,
    relation: &RelationDescriptor,
) -> Option<Join> {
    let RelationKind::BelongsTo { target_key } = &relation.kind else {
        return None;
    };
    let alias = relation.property_name.as_str();

    let mut on = vec![columns_eq(
        SQL::qualified(alias, target_key),
        SQL::qualified(scope.alias(), &relation.foreign_key_column),
    )];
    if let Some(column) = relation.tenant_column.as_deref().filter(|_| scope.options.tenant_scope) {
        let param = binder.bind(AXIS, PARENT, Value::from(scope.tenant));
        on.push(eq(SQL::qualified(alias, column), param));
    }
    if let Some(column) = relation.soft_delete_column.as_deref() {
        on.push(is_null(SQL::qualified(alias, column)));
    }

    Some(Join {
        source: Source::table(relation.schema.as_deref(), &relation.table_name, alias),
        on: Predicate::and(on)?,
    })
}
