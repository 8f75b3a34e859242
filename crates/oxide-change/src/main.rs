//! oxide-change CLI
//!
//! Renders serialized changes to SQL for a target dialect without
//! connecting to a database.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_change::database::BUILTIN_DATABASES;
use oxide_change::prelude::*;

/// Dialect-aware SQL for declarative schema changes.
#[derive(Parser)]
#[command(name = "oxide-change")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SQL for a JSON list of change nodes.
    Sql {
        /// Target dialect.
        #[arg(short, long, env = "OXIDE_DIALECT", default_value = "postgresql")]
        dialect: String,

        /// Changelog parameter, as name=value (repeatable).
        #[arg(short = 'D', value_name = "NAME=VALUE")]
        define: Vec<String>,

        /// File holding the change nodes.
        file: PathBuf,
    },

    /// List built-in dialects.
    Dialects,

    /// List registered change types.
    Changes,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Sql {
            dialect,
            define,
            file,
        } => {
            let Some(database) = database_for_name(&dialect) else {
                bail!(
                    "Unknown dialect '{dialect}', expected one of: {}",
                    BUILTIN_DATABASES.join(", ")
                );
            };

            let mut parameters = MapChangeLogParameters::new();
            for definition in &define {
                let Some((name, value)) = MapChangeLogParameters::parse_definition(definition)
                else {
                    bail!("Invalid parameter '{definition}', expected NAME=VALUE");
                };
                parameters.set(name, value);
            }

            let changes = ChangeFactory::with_core_changes()
                .load_file(&file)
                .with_context(|| format!("Failed to load changes from {}", file.display()))?;
            info!(
                changes = changes.len(),
                dialect = database.short_name(),
                "Rendering changes"
            );

            let renderer = ChangeRenderer::new(SqlGeneratorFactory::global()).with_visitors(
                VisitorPipeline::new()
                    .with(InjectRuntimeVariablesVisitor::new(Arc::new(parameters))),
            );
            for rendered in renderer.render_all(&changes, database.as_ref())? {
                println!("-- {}", rendered.confirmation);
                for warning in rendered.warnings.messages() {
                    println!("-- WARNING: {warning}");
                }
                for sql in &rendered.sql {
                    println!("{sql}");
                }
                println!();
            }
        }

        Commands::Dialects => {
            for name in BUILTIN_DATABASES {
                if let Some(database) = database_for_name(name) {
                    println!("{:<12} {}", database.short_name(), database.full_name());
                }
            }
        }

        Commands::Changes => {
            for name in ChangeFactory::with_core_changes().names() {
                println!("{name}");
            }
        }
    }

    Ok(())
}
