//! Export and import of site data.

use bikesdeal_core::export::{ExportBundle, ExportType, ImportBundle, ImportSummary};
use bikesdeal_core::settings::SiteSettings;
use chrono::{DateTime, Utc};

use crate::db::StorageError;
use crate::stores::Stores;

/// Build an export bundle, reading only the collections `kind` includes.
///
/// # Errors
///
/// Returns an error if a requested collection cannot be read.
pub async fn export(
    stores: &Stores,
    kind: ExportType,
    at: DateTime<Utc>,
) -> Result<ExportBundle, StorageError> {
    let wants = |k| kind == ExportType::All || kind == k;

    let leads = if wants(ExportType::Submissions) {
        stores.leads.all().await?
    } else {
        Vec::new()
    };
    let sections = if wants(ExportType::Content) {
        stores.content.all().await?.into_inner()
    } else {
        Vec::new()
    };
    let settings = if wants(ExportType::Settings) {
        stores.settings.get().await?
    } else {
        SiteSettings::default()
    };

    Ok(ExportBundle::new(kind, at, leads, sections, settings))
}

/// Write every collection present in `bundle`, replacing what is stored.
///
/// # Errors
///
/// Returns an error if a write fails. Collections written before the
/// failure stay written.
pub async fn import(stores: &Stores, bundle: ImportBundle) -> Result<ImportSummary, StorageError> {
    let summary = bundle.summary();
    if !bundle.dropped_sections.is_empty() {
        tracing::warn!(dropped = ?bundle.dropped_sections, "Import skipped duplicate section ids");
    }

    if let Some(leads) = bundle.bike_submissions {
        stores.leads.replace(leads).await?;
    }
    if let Some(sections) = &bundle.content_sections {
        stores.content.replace(sections).await?;
    }
    if let Some(settings) = &bundle.site_settings {
        stores.settings.replace(settings).await?;
    }

    tracing::info!(
        exported_at = %summary.exported_at,
        imported = %summary.describe(),
        "Import complete"
    );
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bikesdeal_core::content::SectionPatch;
    use serde_json::json;

    use super::*;
    use crate::db::{Storage, keys};

    #[tokio::test]
    async fn test_settings_export_ignores_corrupted_leads() {
        let storage = Storage::memory();
        storage.set(keys::BIKE_SUBMISSIONS, json!("broken")).await.unwrap();
        let stores = Stores::new(&storage);

        let bundle = export(&stores, ExportType::Settings, Utc::now()).await.unwrap();
        assert!(bundle.site_settings.is_some());
        assert!(bundle.bike_submissions.is_none());
        assert!(export(&stores, ExportType::All, Utc::now()).await.is_err());
    }

    #[tokio::test]
    async fn test_export_then_import_into_fresh_storage() {
        let source = Stores::new(&Storage::memory());
        source
            .content
            .upsert(
                "footer",
                SectionPatch {
                    title: Some("Ride on".to_owned()),
                    ..SectionPatch::default()
                },
            )
            .await
            .unwrap();
        let bundle = export(&source, ExportType::Content, Utc::now()).await.unwrap();

        let target = Stores::new(&Storage::memory());
        let parsed = ImportBundle::parse(serde_json::to_value(&bundle).unwrap()).unwrap();
        let summary = import(&target, parsed).await.unwrap();
        assert_eq!(summary.content_sections, Some(8));
        assert!(!summary.site_settings);
        assert_eq!(
            target.content.get("footer").await.unwrap().unwrap().title,
            "Ride on"
        );
    }
}
