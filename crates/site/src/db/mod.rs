//! Document storage for site collections.
//!
//! Every collection (content sections, leads, contact submissions,
//! settings) is stored whole, as one JSON document under a well-known key.
//! Writers replace the full document, so concurrent writers from separate
//! processes resolve last-write-wins.
//!
//! ## Backends
//!
//! - `Postgres` - the `site_storage` table (see `crates/site/migrations/`)
//! - `Memory` - a process-local map for development and tests
//!
//! # Migrations
//!
//! Migrations are stored in `crates/site/migrations/` and run via:
//! ```bash
//! cargo run -p bikesdeal-cli -- migrate
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::RwLock;

/// Storage keys for each persisted collection.
pub mod keys {
    pub const BIKE_SUBMISSIONS: &str = "bikeSubmissions";
    pub const CONTENT_SECTIONS: &str = "bikesdeal_content_sections";
    /// Older key for content sections, read when the primary is absent.
    pub const LEGACY_CONTENT_SECTIONS: &str = "contentSections";
    pub const SITE_SETTINGS: &str = "bikesdeal_site_settings";
    pub const BACKGROUND_VIDEO: &str = "backgroundVideoSettings";
    pub const CONTACT_SUBMISSIONS: &str = "contactSubmissions";
}

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored document exists but does not have the expected shape.
    #[error("stored value under '{key}' is corrupted: {source}")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Key/value document storage.
#[derive(Clone)]
pub enum Storage {
    Postgres(PgPool),
    Memory(Arc<RwLock<HashMap<String, Value>>>),
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Storage").field(&self.backend()).finish()
    }
}

impl Storage {
    /// An empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Arc::default())
    }

    /// Backend name for logs.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Read the raw document under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        match self {
            Self::Postgres(pool) => {
                let value =
                    sqlx::query_scalar::<_, Value>("SELECT value FROM site_storage WHERE key = $1")
                        .bind(key)
                        .fetch_optional(pool)
                        .await?;
                Ok(value)
            }
            Self::Memory(map) => Ok(map.read().await.get(key).cloned()),
        }
    }

    /// Replace the document under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        match self {
            Self::Postgres(pool) => {
                sqlx::query(
                    r"
                    INSERT INTO site_storage (key, value)
                    VALUES ($1, $2)
                    ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
                    ",
                )
                .bind(key)
                .bind(value)
                .execute(pool)
                .await?;
            }
            Self::Memory(map) => {
                map.write().await.insert(key.to_owned(), value);
            }
        }
        Ok(())
    }

    /// Read and decode the document under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupted`] when the document does not decode
    /// as `T`, or a database error.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(value) = self.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|source| StorageError::Corrupted {
                key: key.to_owned(),
                source,
            })
    }

    /// Encode `value` and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    pub async fn set_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(value)?;
        self.set(key, value).await
    }

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer.
    pub async fn ping(&self) -> Result<(), StorageError> {
        if let Self::Postgres(pool) = self {
            sqlx::query("SELECT 1").execute(pool).await?;
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
    async fn test_memory_set_then_get() {
        let storage = Storage::memory();
        assert!(storage.get(keys::SITE_SETTINGS).await.unwrap().is_none());

        storage
            .set(keys::SITE_SETTINGS, json!({"siteName": "BikesDeal"}))
            .await
            .unwrap();
        storage
            .set(keys::SITE_SETTINGS, json!({"siteName": "Bikes & Co"}))
            .await
            .unwrap();

        let value = storage.get(keys::SITE_SETTINGS).await.unwrap().unwrap();
        assert_eq!(value, json!({"siteName": "Bikes & Co"}));
        assert!(storage.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_get_json_reports_corruption() {
        let storage = Storage::memory();
        storage
            .set(keys::BIKE_SUBMISSIONS, json!("not a list"))
            .await
            .unwrap();

        let result = storage.get_json::<Vec<Value>>(keys::BIKE_SUBMISSIONS).await;
        match result {
            Err(StorageError::Corrupted { key, .. }) => assert_eq!(key, keys::BIKE_SUBMISSIONS),
            other => panic!("expected corruption, got {other:?}"),
        }
    }
}
