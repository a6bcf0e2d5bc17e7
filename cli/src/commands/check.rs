//! Check command - validates configuration

use sieve_core::{EntityMeta, RelationKind};
use sieve_types::Dialect;

use crate::config::Config;
use crate::error::CliError;
use crate::output;

pub fn run(config: &Config, dialect: Option<Dialect>) -> Result<(), CliError> {
    println!("{}", output::heading("Checking configuration..."));
    println!();
    println!("  {}: {}", output::label("Dialect"), config.dialect(dialect));
    println!("  {}: {}", output::label("Entities"), config.entities.len());

    let mut entities: Vec<&EntityMeta> = config.entities.entities().collect();
    entities.sort_by(|a, b| a.name.cmp(&b.name));

    let mut warnings = Vec::new();
    for entity in entities {
        println!();
        print!("  {} {}... ", output::label("Entity"), entity.name);
        println!("{}", output::status_ok());
        println!("    table: {}", entity.table);
        if let Some(tenant) = &entity.tenant_column {
            println!("    tenant: {tenant}");
        } else if config.options.tenant_scope {
            warnings.push(format!("{} has no tenant column and is not tenant scoped", entity.name));
        }
        if let Some(parent) = &entity.parent {
            println!("    parent: {parent}");
        }
        for relation in &entity.relations {
            let kind = match relation.kind {
                RelationKind::HasMany => "has_many",
                RelationKind::BelongsTo { .. } => "belongs_to",
                RelationKind::ManyToMany { .. } => "many_to_many",
            };
            println!(
                "    {} {} -> {} {}",
                output::muted(kind),
                relation.property_name,
                relation.table_name,
                output::muted(&format!("({})", relation.foreign_key_column))
            );
            if relation.columns.is_empty() && config.dialect(dialect) != Dialect::PostgreSQL {
                warnings.push(format!(
                    "{}.{} declares no columns and cannot be preloaded",
                    entity.name, relation.property_name
                ));
            }
        }
    }

    println!();
    for warning in &warnings {
        println!("{}", output::warn_line(warning));
    }
    println!("{}", output::success("Configuration is valid"));
    Ok(())
}
