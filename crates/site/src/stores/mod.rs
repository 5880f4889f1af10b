//! Persistent stores for each site collection.
//!
//! Every store performs whole-collection read-modify-write against
//! [`Storage`], serialized within the process by a per-store lock.

pub mod contacts;
pub mod content;
pub mod leads;
pub mod settings;

pub use contacts::ContactStore;
pub use content::ContentStore;
pub use leads::LeadStore;
pub use settings::SettingsStore;

use crate::db::Storage;

/// All site stores over one storage backend.
pub struct Stores {
    pub content: ContentStore,
    pub leads: LeadStore,
    pub contacts: ContactStore,
    pub settings: SettingsStore,
}

impl Stores {
    #[must_use]
    pub fn new(storage: &Storage) -> Self {
        Self {
            content: ContentStore::new(storage.clone()),
            leads: LeadStore::new(storage.clone()),
            contacts: ContactStore::new(storage.clone()),
            settings: SettingsStore::new(storage.clone()),
        }
    }
}
