//! Uploaded media on the local filesystem.
//!
//! Files live under `<root>/images` and `<root>/videos` and are served at
//! `/uploads/<dir>/<filename>`.

use std::io;
use std::path::{Path, PathBuf};

use bikesdeal_core::media::{self, MediaError, MediaKind, PlannedName};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] MediaError),

    #[error("No file uploaded")]
    MissingFile,

    #[error("File not found")]
    NotFound,

    #[error("{0}")]
    InvalidParams(String),

    #[error("upload I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A stored upload as reported to the admin console.
///
/// `id` is the stored filename and `type` its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub filename: String,
    pub url: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(skip)]
    pub kind: MediaKind,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir(&self, kind: MediaKind) -> PathBuf {
        self.root.join(kind.dir())
    }

    /// Validate and write an upload. Nothing touches the filesystem until
    /// the declared type, size and filename extension pass.
    ///
    /// Singleton names (`bg-video`, `logo`, `hero-image`) overwrite the
    /// previous file; other names take the first free `-<n>` suffix.
    ///
    /// # Errors
    ///
    /// [`UploadError::Validation`] for a disallowed type, extension or
    /// oversize file, [`UploadError::Io`] when the write fails.
    pub async fn save(
        &self,
        kind: MediaKind,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
        now: DateTime<Utc>,
    ) -> Result<UploadedFile, UploadError> {
        kind.validate(content_type, bytes.len())?;
        let planned = PlannedName::plan(kind, original_name, now.timestamp_millis())?;

        let dir = self.dir(kind);
        tokio::fs::create_dir_all(&dir).await?;

        let filename = if planned.is_singleton() {
            planned.with_suffix(0)
        } else {
            let mut n = 0;
            loop {
                let candidate = planned.with_suffix(n);
                if !tokio::fs::try_exists(dir.join(&candidate)).await? {
                    break candidate;
                }
                n += 1;
            }
        };

        tokio::fs::write(dir.join(&filename), bytes).await?;
        tracing::info!(%kind, %filename, size = bytes.len(), "Upload stored");

        Ok(UploadedFile {
            id: filename.clone(),
            url: kind.public_url(&filename),
            filename,
            mime_type: content_type.trim().to_ascii_lowercase(),
            kind,
            size: bytes.len() as u64,
            uploaded_at: now,
        })
    }

    /// Uploaded files of kind `only` (or every kind), newest first. Files with
    /// unrecognised extensions are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::Io`] if a directory cannot be read.
    pub async fn list(&self, only: Option<MediaKind>) -> Result<Vec<UploadedFile>, UploadError> {
        let mut files = Vec::new();
        for kind in MediaKind::ALL
            .into_iter()
            .filter(|k| only.is_none_or(|want| want == *k))
        {
            let mut entries = match tokio::fs::read_dir(self.dir(kind)).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            while let Some(entry) = entries.next_entry().await? {
                let Ok(filename) = entry.file_name().into_string() else {
                    continue;
                };
                let Some(mime_type) =
                    media::extension(&filename).and_then(|ext| kind.mime_for_extension(&ext))
                else {
                    continue;
                };
                let metadata = entry.metadata().await?;
                if !metadata.is_file() {
                    continue;
                }
                let uploaded_at = metadata
                    .modified()
                    .map_or_else(|_| Utc::now(), DateTime::<Utc>::from);

                files.push(UploadedFile {
                    id: filename.clone(),
                    url: kind.public_url(&filename),
                    filename,
                    mime_type: mime_type.to_owned(),
                    kind,
                    size: metadata.len(),
                    uploaded_at,
                });
            }
        }

        files.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(files)
    }

    /// Delete an upload.
    ///
    /// # Errors
    ///
    /// [`UploadError::Validation`] for names that could leave the upload
    /// directory, [`UploadError::NotFound`] when no such file exists.
    pub async fn delete(&self, kind: MediaKind, filename: &str) -> Result<(), UploadError> {
        media::check_filename(filename)?;
        match tokio::fs::remove_file(self.dir(kind).join(filename)).await {
            Ok(()) => {
                tracing::info!(%kind, filename, "Upload deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(UploadError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bikesdeal_core::media::MAX_IMAGE_BYTES;

    use super::*;

    #[tokio::test]
    async fn test_save_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let saved = store
            .save(MediaKind::Image, "shop-logo.png", "image/png", b"png", Utc::now())
            .await
            .unwrap();
        assert_eq!(saved.filename, "logo.png");
        assert_eq!(saved.id, "logo.png");
        assert_eq!(saved.url, "/uploads/images/logo.png");
        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["type"], "image/png");
        assert!(dir.path().join("images/logo.png").exists());

        let files = store.list(None).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size, 3);
        assert_eq!(files[0].mime_type, "image/png");
        assert!(store.list(Some(MediaKind::Video)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_singleton_names_get_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        let now = Utc::now();

        let first = store
            .save(MediaKind::Image, "IMG_1.jpg", "image/jpeg", b"a", now)
            .await
            .unwrap();
        let second = store
            .save(MediaKind::Image, "IMG_2.jpg", "image/jpeg", b"b", now)
            .await
            .unwrap();
        assert_ne!(first.filename, second.filename);
        assert!(second.filename.ends_with("-1.jpg"));
    }

    #[tokio::test]
    async fn test_singleton_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        for body in [b"one".as_slice(), b"two-two".as_slice()] {
            store
                .save(MediaKind::Video, "promo.mp4", "video/mp4", body, Utc::now())
                .await
                .unwrap();
        }
        let files = store.list(Some(MediaKind::Video)).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "bg-video.mp4");
        assert_eq!(files[0].size, 7);
    }

    #[tokio::test]
    async fn test_oversize_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        let bytes = vec![0_u8; MAX_IMAGE_BYTES + 1];

        let result = store
            .save(MediaKind::Image, "bike.png", "image/png", &bytes, Utc::now())
            .await;
        assert!(matches!(
            result,
            Err(UploadError::Validation(MediaError::TooLarge { .. }))
        ));
        assert!(!dir.path().join("images").exists());
    }

    #[tokio::test]
    async fn test_foreign_extension_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        for name in ["promo.html", "no-extension"] {
            let result = store
                .save(MediaKind::Image, name, "image/png", b"<html>", Utc::now())
                .await;
            assert!(
                matches!(
                    result,
                    Err(UploadError::Validation(MediaError::DisallowedExtension { .. }))
                ),
                "{name}"
            );
        }
        assert!(!dir.path().join("images").exists());
    }

    #[tokio::test]
    async fn test_listed_type_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        let videos = dir.path().join("videos");
        std::fs::create_dir_all(&videos).unwrap();
        std::fs::write(videos.join("bg-video.mov"), b"m").unwrap();
        std::fs::write(videos.join("notes.txt"), b"t").unwrap();

        let files = store.list(Some(MediaKind::Video)).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].id, "bg-video.mov");
        assert_eq!(files[0].mime_type, "video/mov");
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        store
            .save(MediaKind::Image, "hero.webp", "image/webp", b"w", Utc::now())
            .await
            .unwrap();

        store.delete(MediaKind::Image, "hero-image.webp").await.unwrap();
        assert!(matches!(
            store.delete(MediaKind::Image, "hero-image.webp").await,
            Err(UploadError::NotFound)
        ));
        assert!(matches!(
            store.delete(MediaKind::Image, "../secret.txt").await,
            Err(UploadError::Validation(MediaError::InvalidFilename))
        ));
    }
}
