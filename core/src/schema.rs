//! Entity metadata consumed by the compiler.
//!
//! The compiler never introspects a live database or derives foreign keys by
//! naming convention. Entities and their relations are registered up front,
//! either in code through the builder methods or from configuration through
//! serde.

mod entity;
mod relation;

pub use entity::EntityMeta;
pub use relation::{RelationDescriptor, RelationKind};

use compact_str::CompactString;
use hashbrown::HashMap;

use crate::error::{Result, SieveError};

/// Resolves an entity name to its metadata.
///
/// Implementations must answer synchronously and deterministically for a given
/// name. An unknown name is `None`, never an error.
pub trait MetadataResolver {
    fn resolve(&self, entity: &str) -> Option<&EntityMeta>;
}

impl<T: MetadataResolver + ?Sized> MetadataResolver for &T {
    fn resolve(&self, entity: &str) -> Option<&EntityMeta> {
        (**self).resolve(entity)
    }
}

/// Statically constructed registry of entities keyed by name.
///
/// ```
/// use sieve_core::schema::{EntityMeta, MetadataResolver, RelationDescriptor, SchemaRegistry};
///
/// let registry = SchemaRegistry::new().with(
///     EntityMeta::new("user", "users")
///         .relation(RelationDescriptor::has_many("orders", "orders", "user_id")),
/// );
///
/// let user = registry.resolve("user").unwrap();
/// assert_eq!(user.find_relation("orders").unwrap().table_name, "orders");
/// assert!(registry.resolve("missing").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entities: HashMap<CompactString, EntityMeta>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entity`, replacing any entity with the same name.
    pub fn register(&mut self, entity: EntityMeta) {
        self.entities.insert(entity.name.clone(), entity);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, entity: EntityMeta) -> Self {
        self.register(entity);
        self
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Registered entities, in no particular order.
    pub fn entities(&self) -> impl Iterator<Item = &EntityMeta> {
        self.entities.values()
    }

    /// Checks every registered entity, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        for entity in self.entities.values() {
            entity.validate()?;
        }
        Ok(())
    }
}

impl MetadataResolver for SchemaRegistry {
    fn resolve(&self, entity: &str) -> Option<&EntityMeta> {
        self.entities.get(entity)
    }
}

impl FromIterator<EntityMeta> for SchemaRegistry {
    fn from_iter<I: IntoIterator<Item = EntityMeta>>(iter: I) -> Self {
        let mut registry = SchemaRegistry::new();
        for entity in iter {
            registry.register(entity);
        }
        registry
    }
}

impl<'de> serde::Deserialize<'de> for SchemaRegistry {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        Vec::<EntityMeta>::deserialize(deserializer).map(SchemaRegistry::from_iter)
    }
}

pub(crate) fn config_error(entity: &str, message: impl core::fmt::Display) -> SieveError {
    SieveError::Config(format!("entity `{entity}`: {message}"))
}
