//! Upload validation and file naming rules.
//!
//! Pure rules only; the `site` crate does the filesystem work.

use serde::{Deserialize, Serialize};

/// Image MIME types accepted for upload.
pub const IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Video MIME types accepted for upload.
pub const VIDEO_TYPES: &[&str] = &["video/mp4", "video/webm", "video/mov", "video/avi"];

/// Maximum image upload size (10 MiB).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Maximum video upload size (50 MiB).
pub const MAX_VIDEO_BYTES: usize = 50 * 1024 * 1024;

/// Stems that always map to a single file, overwritten on re-upload.
pub const SINGLETON_STEMS: &[&str] = &["bg-video", "logo", "hero-image"];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("Invalid file type. Allowed types: {}", .allowed.join(", "))]
    DisallowedType { allowed: &'static [&'static str] },

    #[error("File too large. Maximum size is {max_mb}MB")]
    TooLarge { max_mb: usize },

    #[error("Invalid file extension. Allowed extensions: {}", .allowed.join(", "))]
    DisallowedExtension { allowed: &'static [&'static str] },

    #[error("Invalid filename")]
    InvalidFilename,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    pub const ALL: [Self; 2] = [Self::Image, Self::Video];

    /// Subdirectory of the upload root, also the URL segment.
    #[must_use]
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Video => "videos",
        }
    }

    #[must_use]
    pub const fn allowed_types(self) -> &'static [&'static str] {
        match self {
            Self::Image => IMAGE_TYPES,
            Self::Video => VIDEO_TYPES,
        }
    }

    #[must_use]
    pub const fn max_bytes(self) -> usize {
        match self {
            Self::Image => MAX_IMAGE_BYTES,
            Self::Video => MAX_VIDEO_BYTES,
        }
    }

    /// Extensions a stored file of this kind may carry.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Image => &["jpg", "jpeg", "png", "gif", "webp"],
            Self::Video => &["mp4", "webm", "mov", "avi"],
        }
    }

    /// MIME type reported for a stored file with extension `ext`.
    #[must_use]
    pub fn mime_for_extension(self, ext: &str) -> Option<&'static str> {
        let mime = match (self, ext) {
            (Self::Image, "jpg" | "jpeg") => "image/jpeg",
            (Self::Image, "png") => "image/png",
            (Self::Image, "gif") => "image/gif",
            (Self::Image, "webp") => "image/webp",
            (Self::Video, "mp4") => "video/mp4",
            (Self::Video, "webm") => "video/webm",
            (Self::Video, "mov") => "video/mov",
            (Self::Video, "avi") => "video/avi",
            _ => return None,
        };
        Some(mime)
    }

    /// Check a declared content type and size against this kind's limits.
    ///
    /// # Errors
    ///
    /// [`MediaError::DisallowedType`] or [`MediaError::TooLarge`].
    pub fn validate(self, content_type: &str, size: usize) -> Result<(), MediaError> {
        let content_type = content_type.trim().to_ascii_lowercase();
        if !self.allowed_types().contains(&content_type.as_str()) {
            return Err(MediaError::DisallowedType {
                allowed: self.allowed_types(),
            });
        }
        if size > self.max_bytes() {
            return Err(MediaError::TooLarge {
                max_mb: self.max_bytes() / (1024 * 1024),
            });
        }
        Ok(())
    }

    /// Public URL of an uploaded file.
    #[must_use]
    pub fn public_url(self, filename: &str) -> String {
        format!("/uploads/{}/{filename}", self.dir())
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            _ => Err(format!("invalid media type: {s}")),
        }
    }
}

/// Lowercased extension of `name`, without the dot.
#[must_use]
pub fn extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Reject names that could leave the upload directory.
///
/// # Errors
///
/// [`MediaError::InvalidFilename`] for empty names, path separators, and
/// `..`.
pub fn check_filename(name: &str) -> Result<(), MediaError> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(MediaError::InvalidFilename);
    }
    Ok(())
}

/// The name an upload should be stored under, before collision handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedName {
    pub stem: String,
    /// Extension including the leading dot.
    pub ext: String,
}

impl PlannedName {
    /// Plan a stored name for a file uploaded as `original`.
    ///
    /// Videos become `bg-video`. Images are named by what the original
    /// name suggests: `logo`, `hero-image` (hero/banner), `bike-<millis>`
    /// (bike/product), or `image-<millis>`.
    ///
    /// # Errors
    ///
    /// [`MediaError::DisallowedExtension`] when `original` has no
    /// extension or one that `kind` does not store.
    pub fn plan(kind: MediaKind, original: &str, now_millis: i64) -> Result<Self, MediaError> {
        let ext = extension(original)
            .filter(|ext| kind.extensions().contains(&ext.as_str()))
            .map(|ext| format!(".{ext}"))
            .ok_or(MediaError::DisallowedExtension {
                allowed: kind.extensions(),
            })?;
        let lower = original.to_lowercase();
        let stem = match kind {
            MediaKind::Video => "bg-video".to_owned(),
            MediaKind::Image if lower.contains("logo") => "logo".to_owned(),
            MediaKind::Image if lower.contains("hero") || lower.contains("banner") => {
                "hero-image".to_owned()
            }
            MediaKind::Image if lower.contains("bike") || lower.contains("product") => {
                format!("bike-{now_millis}")
            }
            MediaKind::Image => format!("image-{now_millis}"),
        };
        Ok(Self { stem, ext })
    }

    /// Singletons overwrite the previous file instead of taking a suffix.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        SINGLETON_STEMS.contains(&self.stem.as_str())
    }

    /// `<stem><ext>` for `n == 0`, `<stem>-<n><ext>` otherwise.
    #[must_use]
    pub fn with_suffix(&self, n: u32) -> String {
        if n == 0 {
            format!("{}{}", self.stem, self.ext)
        } else {
            format!("{}-{n}{}", self.stem, self.ext)
        }
    }
}
