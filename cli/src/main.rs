//! Sieve CLI - Main entry point

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use sieve_cli::commands::{self, compile::Format};
use sieve_cli::config::Config;
use sieve_cli::error::CliError;
use sieve_types::Dialect;

/// Sieve - compile declarative filter requests into SQL
#[derive(Parser, Debug)]
#[command(name = "sieve")]
#[command(author, version, about = "Compile declarative filter requests into SQL", long_about = None)]
struct Cli {
    /// Path to config file (default: sieve.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override dialect from config
    #[arg(long, global = true, value_parser = parse_dialect)]
    dialect: Option<Dialect>,

    /// Log compile decisions to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate configuration file
    Check,

    /// Print the rows and count statements for a request
    Compile {
        /// Entity to compile against
        #[arg(short, long)]
        entity: String,

        /// JSON request file, or `-` for stdin
        #[arg(short, long, value_name = "PATH")]
        request: PathBuf,

        /// Tenant identifier (default from config)
        #[arg(short, long)]
        tenant: Option<String>,

        /// Reject malformed requests instead of ignoring bad entries
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Run a request against a SQLite database and print the page as JSON
    Query {
        /// Entity to query
        #[arg(short, long)]
        entity: String,

        /// JSON request file, or `-` for stdin
        #[arg(short, long, value_name = "PATH")]
        request: PathBuf,

        /// SQLite database file
        #[arg(short, long, value_name = "PATH")]
        database: PathBuf,

        /// Tenant identifier (default from config)
        #[arg(short, long)]
        tenant: Option<String>,

        /// Reject malformed requests instead of ignoring bad entries
        #[arg(long)]
        strict: bool,
    },
}

fn parse_dialect(s: &str) -> Result<Dialect, String> {
    Dialect::parse(s).ok_or_else(|| format!("unknown dialect '{s}' (sqlite, postgresql, mysql)"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "sieve_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Check => commands::check::run(&config, cli.dialect),
        Command::Compile {
            entity,
            request,
            tenant,
            strict,
            format,
        } => commands::compile::run(
            &config,
            commands::compile::Args {
                entity: &entity,
                request: &request,
                tenant: tenant.as_deref(),
                dialect: cli.dialect,
                strict,
                format,
            },
        ),
        Command::Query {
            entity,
            request,
            database,
            tenant,
            strict,
        } => commands::query::run(
            &config,
            commands::query::Args {
                entity: &entity,
                request: &request,
                database: &database,
                tenant: tenant.as_deref(),
                strict,
            },
        ),
    }
}

/// Load configuration with fallback to default path
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config, CliError> {
    match custom_path {
        Some(path) => Config::load_from(path).map_err(Into::into),
        None => Config::load().map_err(Into::into),
    }
}
