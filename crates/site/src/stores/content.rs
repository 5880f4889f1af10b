//! Content section store.
//!
//! Sections are persisted as one collection under the primary key and
//! mirrored to the legacy key. Reads prefer the primary key.

use bikesdeal_core::content::{ContentFilter, ContentSection, SectionList, SectionPatch};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::db::{Storage, StorageError, keys};

pub struct ContentStore {
    storage: Storage,
    write_lock: Mutex<()>,
}

impl ContentStore {
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Read the stored collection, `None` when neither key holds one.
    ///
    /// A document that does not decode falls back to defaults so the
    /// public site keeps rendering; it is not overwritten until the next
    /// admin write.
    async fn read_stored(&self) -> Result<Option<SectionList>, StorageError> {
        let stored = match self.storage.get(keys::CONTENT_SECTIONS).await? {
            Some(value) => Some((keys::CONTENT_SECTIONS, value)),
            None => self
                .storage
                .get(keys::LEGACY_CONTENT_SECTIONS)
                .await?
                .map(|value| (keys::LEGACY_CONTENT_SECTIONS, value)),
        };
        let Some((key, value)) = stored else {
            return Ok(None);
        };

        match serde_json::from_value::<Vec<ContentSection>>(value) {
            Ok(sections) => {
                let (list, dropped) = SectionList::dedup(sections);
                if !dropped.is_empty() {
                    tracing::warn!(key, ?dropped, "Ignoring duplicate content section ids");
                }
                Ok(Some(list))
            }
            Err(error) => {
                tracing::warn!(key, %error, "Stored content sections are corrupted, serving defaults");
                Ok(Some(SectionList::defaults()))
            }
        }
    }

    /// Load the collection for a writer already holding `write_lock`,
    /// seeding and persisting defaults on first use.
    async fn load_locked(&self) -> Result<SectionList, StorageError> {
        if let Some(list) = self.read_stored().await? {
            return Ok(list);
        }
        let defaults = SectionList::defaults();
        self.save(&defaults).await?;
        tracing::info!(sections = defaults.len(), "Seeded default content sections");
        Ok(defaults)
    }

    /// Load the collection for a reader. Seeding takes `write_lock` and
    /// checks again, so it never lands on top of a concurrent first edit.
    async fn load(&self) -> Result<SectionList, StorageError> {
        if let Some(list) = self.read_stored().await? {
            return Ok(list);
        }
        let _guard = self.write_lock.lock().await;
        self.load_locked().await
    }

    async fn save(&self, list: &SectionList) -> Result<(), StorageError> {
        let value = serde_json::to_value(list)?;
        self.storage
            .set(keys::CONTENT_SECTIONS, value.clone())
            .await?;
        self.storage.set(keys::LEGACY_CONTENT_SECTIONS, value).await
    }

    /// Sections matching `filter`, ascending by order.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn list(&self, filter: ContentFilter) -> Result<Vec<ContentSection>, StorageError> {
        Ok(self.load().await?.list(filter))
    }

    /// The whole collection in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn all(&self) -> Result<SectionList, StorageError> {
        self.load().await
    }

    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn get(&self, id: &str) -> Result<Option<ContentSection>, StorageError> {
        Ok(self.load().await?.get(id).cloned())
    }

    /// Merge `patch` into section `id`, creating it when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn upsert(&self, id: &str, patch: SectionPatch) -> Result<ContentSection, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut list = self.load_locked().await?;
        let section = list.upsert(id, patch);
        self.save(&list).await?;
        tracing::info!(section_id = %section.id, "Content section saved");
        Ok(section)
    }

    /// Create a section with a generated id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn add(&self, patch: SectionPatch) -> Result<ContentSection, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut list = self.load_locked().await?;
        let section = list.add(patch);
        self.save(&list).await?;
        tracing::info!(section_id = %section.id, "Content section added");
        Ok(section)
    }

    /// Returns `false` when no section had this id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut list = self.load_locked().await?;
        if !list.remove(id) {
            return Ok(false);
        }
        self.save(&list).await?;
        tracing::info!(section_id = id, "Content section removed");
        Ok(true)
    }

    /// Replace the collection with the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn reset(&self) -> Result<Vec<ContentSection>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let defaults = SectionList::defaults();
        self.save(&defaults).await?;
        tracing::info!("Content sections reset to defaults");
        Ok(defaults.into_inner())
    }

    /// Replace the collection wholesale (import).
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn replace(&self, list: &SectionList) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        self.save(list).await
    }

    /// Whether either content key holds a document.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn is_seeded(&self) -> Result<bool, StorageError> {
        let primary: Option<Value> = self.storage.get(keys::CONTENT_SECTIONS).await?;
        if primary.is_some() {
            return Ok(true);
        }
        Ok(self
            .storage
            .get(keys::LEGACY_CONTENT_SECTIONS)
            .await?
            .is_some())
    }
}
