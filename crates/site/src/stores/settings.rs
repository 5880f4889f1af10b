//! Site settings store.
//!
//! Background video settings live under their own key and are laid over
//! the stored settings on read.

use bikesdeal_core::settings::{BackgroundVideo, SettingsPatch, SiteSettings, effective};
use tokio::sync::Mutex;

use crate::db::{Storage, StorageError, keys};

pub struct SettingsStore {
    storage: Storage,
    write_lock: Mutex<()>,
}

impl SettingsStore {
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Decode `key`, treating a corrupted document as absent.
    async fn load_lenient<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        match self.storage.get_json::<T>(key).await {
            Ok(value) => Ok(value),
            Err(StorageError::Corrupted { key, source }) => {
                tracing::warn!(%key, error = %source, "Stored settings are corrupted, using defaults");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Effective settings: stored (or default) settings with the background
    /// video laid over.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn get(&self) -> Result<SiteSettings, StorageError> {
        let stored = self.load_lenient::<SiteSettings>(keys::SITE_SETTINGS).await?;
        let video = self.load_lenient::<BackgroundVideo>(keys::BACKGROUND_VIDEO).await?;
        Ok(effective(stored, video))
    }

    /// Shallow-merge `patch` into the stored settings.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn update(&self, patch: SettingsPatch) -> Result<SiteSettings, StorageError> {
        let guard = self.write_lock.lock().await;
        let mut settings = self
            .load_lenient::<SiteSettings>(keys::SITE_SETTINGS)
            .await?
            .unwrap_or_default();
        let video = patch.background_video.clone();
        settings.apply(patch);
        self.storage.set_json(keys::SITE_SETTINGS, &settings).await?;
        if let Some(video) = video {
            self.storage
                .set_json(keys::BACKGROUND_VIDEO, &video.clamped())
                .await?;
        }
        tracing::info!("Site settings updated");
        drop(guard);
        self.get().await
    }

    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn background_video(&self) -> Result<BackgroundVideo, StorageError> {
        Ok(self
            .get()
            .await?
            .background_video
            .unwrap_or_default())
    }

    /// Store background video settings, clamping opacity into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn set_background_video(
        &self,
        video: BackgroundVideo,
    ) -> Result<BackgroundVideo, StorageError> {
        let _guard = self.write_lock.lock().await;
        let video = video.clamped();
        self.storage.set_json(keys::BACKGROUND_VIDEO, &video).await?;
        tracing::info!(enabled = video.is_enabled, opacity = video.opacity, "Background video updated");
        Ok(video)
    }

    /// Replace stored settings wholesale (import).
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn replace(&self, settings: &SiteSettings) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        self.storage.set_json(keys::SITE_SETTINGS, settings).await?;
        if let Some(video) = &settings.background_video {
            self.storage
                .set_json(keys::BACKGROUND_VIDEO, &video.clone().clamped())
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_defaults_when_nothing_stored() {
        let store = SettingsStore::new(Storage::memory());
        assert_eq!(store.get().await.unwrap(), SiteSettings::default());
    }

    #[tokio::test]
    async fn test_background_video_overlays_settings() {
        let store = SettingsStore::new(Storage::memory());
        store
            .set_background_video(BackgroundVideo {
                url: "/uploads/videos/bg-video.mp4".to_owned(),
                is_enabled: true,
                opacity: 3.0,
            })
            .await
            .unwrap();

        let settings = store.get().await.unwrap();
        let video = settings.background_video.unwrap();
        assert_eq!(video.url, "/uploads/videos/bg-video.mp4");
        assert!((video.opacity - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_update_merges_top_level_fields() {
        let storage = Storage::memory();
        storage
            .set(keys::SITE_SETTINGS, json!({"siteName": "Bikes & Co", "contactPhone": "+91 1"}))
            .await
            .unwrap();
        let store = SettingsStore::new(storage);

        let patch: SettingsPatch = serde_json::from_value(json!({"contactPhone": "+91 2"})).unwrap();
        let settings = store.update(patch).await.unwrap();
        assert_eq!(settings.site_name, "Bikes & Co");
        assert_eq!(settings.contact_phone, "+91 2");
    }
}
