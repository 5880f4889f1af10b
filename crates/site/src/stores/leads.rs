//! Bike lead store.
//!
//! Unlike content, a lead collection that fails to decode is an error:
//! silently replacing it would drop submissions.

use bikesdeal_core::lead::{
    LeadAnalytics, LeadFilter, LeadList, LeadStats, LeadSubmission, NewLead,
};
use bikesdeal_core::types::LeadStatus;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::db::{Storage, StorageError, keys};

pub struct LeadStore {
    storage: Storage,
    write_lock: Mutex<()>,
}

impl LeadStore {
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<LeadList, StorageError> {
        Ok(self
            .storage
            .get_json::<LeadList>(keys::BIKE_SUBMISSIONS)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, leads: &LeadList) -> Result<(), StorageError> {
        self.storage.set_json(keys::BIKE_SUBMISSIONS, leads).await
    }

    /// Store a validated lead as `pending`.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn create(&self, lead: NewLead, now: DateTime<Utc>) -> Result<LeadSubmission, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut leads = self.load().await?;
        let submission = leads.create(lead, now);
        self.save(&leads).await?;
        tracing::info!(lead_id = %submission.id, brand = %submission.bike_details.brand, "Lead created");
        Ok(submission)
    }

    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn list(&self, filter: &LeadFilter) -> Result<Vec<LeadSubmission>, StorageError> {
        Ok(self.load().await?.list(filter))
    }

    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn all(&self) -> Result<Vec<LeadSubmission>, StorageError> {
        Ok(self.load().await?.into_inner())
    }

    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn get(&self, id: &str) -> Result<Option<LeadSubmission>, StorageError> {
        Ok(self.load().await?.get(id).cloned())
    }

    /// Set a lead's status. Setting the status a lead already has leaves
    /// the stored record unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn set_status(
        &self,
        id: &str,
        status: LeadStatus,
    ) -> Result<Option<LeadSubmission>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut leads = self.load().await?;
        let Some(lead) = leads.set_status(id, status) else {
            return Ok(None);
        };
        self.save(&leads).await?;
        tracing::info!(lead_id = id, %status, "Lead status updated");
        Ok(Some(lead))
    }

    /// Returns `false` when no lead had this id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut leads = self.load().await?;
        if !leads.remove(id) {
            return Ok(false);
        }
        self.save(&leads).await?;
        tracing::info!(lead_id = id, "Lead deleted");
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn stats(&self) -> Result<LeadStats, StorageError> {
        Ok(self.load().await?.stats())
    }

    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn analytics(&self, now: DateTime<Utc>) -> Result<LeadAnalytics, StorageError> {
        Ok(self.load().await?.analytics(now))
    }

    /// Replace the collection wholesale (import).
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn replace(&self, leads: Vec<LeadSubmission>) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        self.save(&LeadList::new(leads)).await
    }
}
