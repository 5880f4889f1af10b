//! CLI subcommands.

pub mod data;
pub mod migrate;
pub mod seed;

use bikesdeal_core::export::ImportError;
use bikesdeal_site::db::{self, Storage, StorageError};
use secrecy::SecretString;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid bundle: {0}")]
    Import(#[from] ImportError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// `SITE_DATABASE_URL`, falling back to `DATABASE_URL`.
fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("SITE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("SITE_DATABASE_URL"))
}

/// Connect to the site database.
async fn connect() -> Result<Storage, CommandError> {
    let url = database_url()?;
    tracing::info!("Connecting to site database...");
    let pool = db::create_pool(&url).await?;
    Ok(Storage::Postgres(pool))
}
