//! Configuration for the sieve CLI
//!
//! Loads `sieve.toml`: the target dialect, compile options and the entity
//! registry.
//!
//! ```toml
//! dialect = "postgresql"
//!
//! [options]
//! default_tenant = "1"
//! # joins each entity's parent and checks its tenant; defaults to false
//! parent_scope = true
//!
//! [[entities]]
//! name = "user"
//! table = "users"
//! tenant_column = "app_id"
//!
//! [[entities.relations]]
//! name = "orders"
//! table = "orders"
//! foreign_key = "user_id"
//! kind = "has_many"
//! ```

use serde::Deserialize;
use sieve_core::{CompileOptions, Compiler, SchemaRegistry};
use sieve_types::Dialect;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "sieve.toml";

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides `options.dialect`
    pub dialect: Option<Dialect>,
    pub options: CompileOptions,
    pub entities: SchemaRegistry,
}

impl Config {
    /// Load from `sieve.toml` in the working directory
    pub fn load() -> Result<Self, Error> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load from specific path
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.into())
            } else {
                Error::Io(path.into(), e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| Error::Parse(path.into(), e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.entities.is_empty() {
            return Err(Error::NoEntities);
        }
        self.entities.validate().map_err(Error::Schema)
    }

    /// Effective dialect: `override_dialect`, then `dialect`, then `options.dialect`.
    pub fn dialect(&self, override_dialect: Option<Dialect>) -> Dialect {
        override_dialect
            .or(self.dialect)
            .unwrap_or(self.options.dialect)
    }

    pub fn compiler(&self, override_dialect: Option<Dialect>) -> Compiler<&SchemaRegistry> {
        let options = self.options.clone().dialect(self.dialect(override_dialect));
        Compiler::new(&self.entities, options)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("no entities declared")]
    NoEntities,

    #[error("invalid schema: {0}")]
    Schema(#[source] sieve_core::SieveError),
}

pub type ConfigError = Error;

// ============================================================================
// Tests
// ============================================================================
