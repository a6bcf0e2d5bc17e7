//! The compile pipeline.
//!
//! [`Compiler::compile`] runs every axis in a fixed order, each stage
//! returning an optional predicate (or ordering) that the assembler combines:
//!
//! tenant scope, basic filter, parent filter, nested-relation filter,
//! many-to-many filter, search, range, group, sort, preload.
//!
//! Compilation never fails. Entries that cannot be resolved are skipped and,
//! with the `tracing` feature, reported as debug events.

mod filter;
mod group;
mod m2m;
mod nested;
mod preload;
mod range;
mod relation;
mod search;
mod sort;
mod tenant;

use sieve_types::Dialect;

use crate::compiled::CompiledQuery;
use crate::options::CompileOptions;
use crate::param::ParamBinder;
use crate::predicate::Predicate;
use crate::request::FilterRequest;
use crate::schema::{EntityMeta, MetadataResolver};
use crate::select::{Join, Source};
use crate::{sieve_trace_compile, sieve_trace_skip};

/// Compiles [`FilterRequest`]s against entities known to a resolver.
///
/// ```
/// use sieve_core::prelude::*;
///
/// let registry = SchemaRegistry::new().with(EntityMeta::new("user", "users"));
/// let compiler = Compiler::new(registry, CompileOptions::new(Dialect::PostgreSQL));
///
/// let request = FilterRequest::new().filter_by("status", ["active", "!banned"]);
/// let query = compiler.compile_for("user", &request, None).unwrap();
///
/// let rows = query.rows_statement();
/// assert_eq!(
///     rows.sql,
///     r#"SELECT DISTINCT "t0".* FROM "users" AS "t0" WHERE "t0"."status" IN ($1) AND "t0"."status" NOT IN ($2)"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Compiler<R> {
    resolver: R,
    options: CompileOptions,
}

/// Per-compile context shared by the stages.
pub(crate) struct Scope<'a> {
    pub entity: &'a EntityMeta,
    pub options: &'a CompileOptions,
    pub tenant: &'a str,
    /// Alias of the inner-joined parent, when there is one.
    pub parent: Option<&'a str>,
}

impl Scope<'_> {
    pub fn dialect(&self) -> Dialect {
        self.options.dialect
    }

    pub fn alias(&self) -> &str {
        &self.options.alias
    }
}

impl<R: MetadataResolver> Compiler<R> {
    pub fn new(resolver: R, options: CompileOptions) -> Self {
        Self { resolver, options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolves `entity` and compiles `request` against it.
    ///
    /// `None` only when the entity is unknown to the resolver.
    pub fn compile_for(
        &self,
        entity: &str,
        request: &FilterRequest,
        tenant: Option<&str>,
    ) -> Option<CompiledQuery> {
        let meta = self.resolver.resolve(entity)?;
        Some(self.compile(meta, request, tenant))
    }

    /// Compiles `request` against `entity`.
    ///
    /// `tenant` falls back to [`CompileOptions::default_tenant`].
    pub fn compile(
        &self,
        entity: &EntityMeta,
        request: &FilterRequest,
        tenant: Option<&str>,
    ) -> CompiledQuery {
        let options = &self.options;
        let mut binder = ParamBinder::new();

        let parent_join = options
            .parent_scope
            .then(|| entity.parent_relation())
            .flatten();
        let scope = Scope {
            entity,
            options,
            tenant: tenant.unwrap_or(options.default_tenant.as_str()),
            parent: parent_join.map(|r| r.property_name.as_str()),
        };

        let joins: Vec<Join> = parent_join
            .and_then(|relation| tenant::parent_join(&scope, &mut binder, relation))
            .into_iter()
            .collect();

        let stages = [
            tenant::root_scope(&scope, &mut binder),
            filter::basic(&scope, &mut binder, request),
            filter::parent(&scope, &mut binder, request),
            nested::compile(&scope, &mut binder, request),
            m2m::compile(&scope, &mut binder, request),
            search::compile(&scope, &mut binder, request),
            range::compile(&scope, &mut binder, request),
            group::compile(&scope, &mut binder, request),
        ];
        let active = stages.iter().filter(|s| s.is_some()).count();
        let predicate = Predicate::and(stages.into_iter().flatten());

        let sort = sort::compile(&scope, request);
        let mut columns = sort.columns;
        columns.extend(preload::compile(&scope, request));

        sieve_trace_compile!(entity.name, active, binder.len());

        CompiledQuery {
            dialect: options.dialect,
            from: Source::table(entity.schema.as_deref(), &entity.table, &options.alias),
            primary_key: entity.primary_key.clone(),
            joins,
            predicate,
            columns,
            order_by: sort.order_by,
            pagination: request.pagination(),
            params: binder.finish(),
        }
    }
}

/// Pairs up a parallel-array axis, or returns nothing when the lengths differ.
pub(crate) fn paired<'r, T>(
    axis: &'static str,
    fields: &'r [String],
    values: &'r [T],
) -> impl Iterator<Item = (usize, &'r str, &'r T)> {
    let aligned = fields.len() == values.len();
    if !aligned {
        sieve_trace_skip!(axis, fields.len(), "parallel arrays differ in length");
    }
    fields
        .iter()
        .zip(values)
        .enumerate()
        .filter(move |_| aligned)
        .map(|(i, (field, values))| (i, field.as_str(), values))
}
