//! Export and import of site data bundles.

use std::path::{Path, PathBuf};

use bikesdeal_core::export::{ExportType, ImportBundle};
use bikesdeal_site::db::Storage;
use bikesdeal_site::portability;
use bikesdeal_site::stores::Stores;
use chrono::Utc;

use super::{CommandError, connect};

/// Export `kind` to `output`, or to the dated bundle name in the current
/// directory. Returns the path written.
///
/// # Errors
///
/// Returns an error if a collection cannot be read or the file cannot be
/// written.
pub async fn export(kind: ExportType, output: Option<PathBuf>) -> Result<PathBuf, CommandError> {
    let storage = connect().await?;
    export_to(&storage, kind, output).await
}

pub(crate) async fn export_to(
    storage: &Storage,
    kind: ExportType,
    output: Option<PathBuf>,
) -> Result<PathBuf, CommandError> {
    let now = Utc::now();
    let bundle = portability::export(&Stores::new(storage), kind, now).await?;
    let path = output.unwrap_or_else(|| PathBuf::from(kind.filename(now)));

    tokio::fs::write(&path, serde_json::to_vec_pretty(&bundle)?).await?;
    tracing::info!(path = %path.display(), %kind, "Export written");
    Ok(path)
}

/// Import the bundle at `file`.
///
/// # Errors
///
/// Returns an error if the file is unreadable, is not a bundle, or a write
/// fails.
pub async fn import(file: &Path) -> Result<(), CommandError> {
    let storage = connect().await?;
    import_from(&storage, file).await
}

pub(crate) async fn import_from(storage: &Storage, file: &Path) -> Result<(), CommandError> {
    let raw = tokio::fs::read(file).await?;
    let bundle = ImportBundle::parse(serde_json::from_slice(&raw)?)?;
    let summary = portability::import(&Stores::new(storage), bundle).await?;
    tracing::info!("Successfully imported: {}", summary.describe());
    Ok(())
}
