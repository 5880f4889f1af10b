//! Admin media uploads.
//!
//! Files are validated against the declared content type and the size
//! ceiling of their kind before anything is written.

use axum::{
    Json,
    extract::{
        Multipart, Query, State,
        multipart::{Field, MultipartError},
    },
    http::StatusCode,
};
use bikesdeal_core::media::{MAX_VIDEO_BYTES, MediaError, MediaKind};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAdmin;
use crate::state::AppState;
use crate::uploads::{UploadError, UploadedFile};

/// Request body limit for the upload route: the largest file ceiling plus
/// room for the multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_VIDEO_BYTES + 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(flatten)]
    pub file: UploadedFile,
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub success: bool,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub filename: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

fn parse_kind(raw: &str) -> std::result::Result<MediaKind, UploadError> {
    raw.trim()
        .parse()
        .map_err(|_| UploadError::InvalidParams(format!("Invalid file type '{raw}'")))
}

fn multipart_error(kind: MediaKind, err: &MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return UploadError::Validation(MediaError::TooLarge {
            max_mb: kind.max_bytes() / (1024 * 1024),
        })
        .into();
    }
    AppError::BadRequest(err.body_text())
}

async fn read_field(field: &mut Field<'_>, kind: MediaKind) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(kind, &e))?
    {
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Upload an image or video.
///
/// POST /api/upload (multipart: `file`, `type` = image | video)
#[instrument(skip_all, fields(kind, filename))]
pub async fn upload(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut kind = MediaKind::Image;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(kind, &e))?
    {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("type") => {
                let text = field.text().await.map_err(|e| multipart_error(kind, &e))?;
                kind = parse_kind(&text)?;
            }
            Some("file") => {
                let name = field.file_name().unwrap_or_default().to_owned();
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let bytes = read_field(&mut field, kind).await?;
                file = Some((name, content_type, bytes));
            }
            _ => {}
        }
    }

    let (name, content_type, bytes) = file
        .filter(|(_, _, bytes)| !bytes.is_empty())
        .ok_or(UploadError::MissingFile)?;
    tracing::Span::current()
        .record("kind", tracing::field::display(kind))
        .record("filename", name.as_str());

    let file = state
        .uploads()
        .save(kind, &name, &content_type, &bytes, chrono::Utc::now())
        .await?;
    add_breadcrumb("upload", &format!("Uploaded {}", file.filename));

    Ok(Json(UploadResponse {
        success: true,
        file,
    }))
}

/// List uploaded files, newest first.
///
/// GET /api/upload?type=all|image|video
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<FileListResponse>> {
    let only = match query.kind.as_deref().map(str::trim) {
        None | Some("" | "all") => None,
        Some(raw) => Some(parse_kind(raw)?),
    };
    let files = state.uploads().list(only).await?;
    Ok(Json(FileListResponse {
        success: true,
        files,
    }))
}

/// Delete an uploaded file.
///
/// DELETE /api/upload?filename=...&type=image|video
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>> {
    let (Some(filename), Some(kind)) = (query.filename, query.kind) else {
        return Err(UploadError::InvalidParams("Missing filename or type".to_string()).into());
    };
    let kind = parse_kind(&kind)?;
    state.uploads().delete(kind, &filename).await?;
    Ok(Json(json!({
        "success": true,
        "message": "File deleted successfully",
    })))
}
