//! BikesDeal CLI - Database migrations and data management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the site_storage table
//! bikesdeal-cli migrate
//!
//! # Store the default content sections (no-op when content exists)
//! bikesdeal-cli seed
//! bikesdeal-cli seed --force
//!
//! # Write a bundle to disk
//! bikesdeal-cli export --type content --output content.json
//!
//! # Load a bundle
//! bikesdeal-cli import backup.json
//! ```
//!
//! Every command reads `SITE_DATABASE_URL` (or `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bikesdeal_core::export::ExportType;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bikesdeal-cli")]
#[command(author, version, about = "BikesDeal CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Store the default content sections and site settings
    Seed {
        /// Overwrite existing content and settings
        #[arg(long)]
        force: bool,
    },
    /// Export site data as a JSON bundle
    Export {
        /// What to export (`all`, `submissions`, `content`, `settings`)
        #[arg(short = 't', long = "type", default_value = "all")]
        kind: ExportType,

        /// Output file; defaults to the dated bundle name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a JSON bundle produced by `export`
    Import {
        /// Bundle file to read
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { force } => commands::seed::run(force).await?,
        Commands::Export { kind, output } => {
            commands::data::export(kind, output).await?;
        }
        Commands::Import { file } => commands::data::import(&file).await?,
    }
    Ok(())
}
