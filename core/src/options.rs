use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use sieve_types::Dialect;

/// Options shared by every compile.
///
/// Deserializes with defaults, so an empty `[options]` table is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub dialect: Dialect,
    /// Alias of the root table in every generated statement.
    pub alias: CompactString,
    /// Tenant identifier used when the caller supplies none.
    pub default_tenant: CompactString,
    /// Restrict root rows to the caller's tenant when the entity has a tenant column.
    pub tenant_scope: bool,
    /// Inner join the declared parent entity and check its tenant. Off by
    /// default, and parent filters are skipped while it is off.
    pub parent_scope: bool,
    /// Prefix routing a filter value to the exclusion list.
    pub exclusion_marker: CompactString,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            alias: CompactString::const_new("t0"),
            default_tenant: CompactString::const_new("1"),
            tenant_scope: true,
            parent_scope: false,
            exclusion_marker: CompactString::const_new("!"),
        }
    }
}

impl CompileOptions {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn alias(mut self, alias: impl Into<CompactString>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn default_tenant(mut self, tenant: impl Into<CompactString>) -> Self {
        self.default_tenant = tenant.into();
        self
    }

    pub fn tenant_scope(mut self, enabled: bool) -> Self {
        self.tenant_scope = enabled;
        self
    }

    pub fn parent_scope(mut self, enabled: bool) -> Self {
        self.parent_scope = enabled;
        self
    }

    pub fn exclusion_marker(mut self, marker: impl Into<CompactString>) -> Self {
        self.exclusion_marker = marker.into();
        self
    }
}
