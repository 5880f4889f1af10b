//! Seed the default content sections and site settings.

use bikesdeal_core::settings::SiteSettings;
use bikesdeal_site::db::Storage;
use bikesdeal_site::stores::Stores;

use super::{CommandError, connect};

/// Seed the site database.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a write fails.
pub async fn run(force: bool) -> Result<(), CommandError> {
    let storage = connect().await?;
    seed(&storage, force).await
}

/// Write the defaults unless content already exists (or `force` is set).
pub(crate) async fn seed(storage: &Storage, force: bool) -> Result<(), CommandError> {
    let stores = Stores::new(storage);

    if stores.content.is_seeded().await? && !force {
        tracing::info!("Content already present; use --force to overwrite");
        return Ok(());
    }

    let sections = stores.content.reset().await?;
    if force {
        stores.settings.replace(&SiteSettings::default()).await?;
    }

    tracing::info!(sections = sections.len(), force, "Seeding complete!");
    Ok(())
}
