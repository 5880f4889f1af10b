//! Contact-form submission store.

use bikesdeal_core::contact::{ContactList, ContactStats, ContactSubmission};
use bikesdeal_core::types::ContactStatus;
use tokio::sync::Mutex;

use crate::db::{Storage, StorageError, keys};

pub struct ContactStore {
    storage: Storage,
    write_lock: Mutex<()>,
}

impl ContactStore {
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<ContactList, StorageError> {
        Ok(self
            .storage
            .get_json::<ContactList>(keys::CONTACT_SUBMISSIONS)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, contacts: &ContactList) -> Result<(), StorageError> {
        self.storage.set_json(keys::CONTACT_SUBMISSIONS, contacts).await
    }

    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn add(&self, submission: ContactSubmission) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut contacts = self.load().await?;
        let id = submission.id.clone();
        contacts.push(submission);
        self.save(&contacts).await?;
        tracing::info!(contact_id = %id, "Contact submission stored");
        Ok(())
    }

    /// All submissions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn list(&self) -> Result<Vec<ContactSubmission>, StorageError> {
        Ok(self.load().await?.list())
    }

    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn set_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> Result<Option<ContactSubmission>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut contacts = self.load().await?;
        let Some(submission) = contacts.set_status(id, status) else {
            return Ok(None);
        };
        self.save(&contacts).await?;
        Ok(Some(submission))
    }

    /// Returns `false` when no submission had this id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut contacts = self.load().await?;
        if !contacts.remove(id) {
            return Ok(false);
        }
        self.save(&contacts).await?;
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns an error if storage fails or the stored collection is corrupted.
    pub async fn stats(&self) -> Result<ContactStats, StorageError> {
        Ok(self.load().await?.stats())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bikesdeal_core::contact::ContactForm;
    use chrono::Utc;

    use super::*;

    #[tokio::test]
    async fn test_add_mark_read_delete() {
        let store = ContactStore::new(Storage::memory());
        let submission = ContactForm {
            name: "Kavya".to_owned(),
            email: "kavya@mail.com".to_owned(),
            phone: None,
            message: "Do you buy scooters?".to_owned(),
        }
        .into_submission(Utc::now())
        .unwrap();
        let id = submission.id.clone();
        store.add(submission).await.unwrap();

        let updated = store
            .set_status(id.as_str(), ContactStatus::Read)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, ContactStatus::Read);
        assert_eq!(store.stats().await.unwrap().read, 1);

        assert!(store.delete(id.as_str()).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
