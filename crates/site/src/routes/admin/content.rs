//! Admin content-section editing.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bikesdeal_core::content::{ContentFilter, ContentSection, SectionPatch};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SectionResponse {
    pub success: bool,
    pub section: ContentSection,
}

#[derive(Debug, Serialize)]
pub struct SectionListResponse {
    pub success: bool,
    pub sections: Vec<ContentSection>,
}

/// Every section, hidden ones included.
///
/// GET /api/admin/content
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<SectionListResponse>> {
    let sections = state
        .stores()
        .content
        .list(ContentFilter::default())
        .await?;
    Ok(Json(SectionListResponse {
        success: true,
        sections,
    }))
}

/// Add a custom section with a generated id.
///
/// POST /api/admin/content
#[instrument(skip(state, patch))]
pub async fn add(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(patch): Json<SectionPatch>,
) -> Result<(StatusCode, Json<SectionResponse>)> {
    let section = state.stores().content.add(patch).await?;
    add_breadcrumb("content", &format!("Section {} added", section.id));
    Ok((
        StatusCode::CREATED,
        Json(SectionResponse {
            success: true,
            section,
        }),
    ))
}

/// Merge `patch` into section `id`, creating it when absent.
///
/// PUT /api/admin/content/{id}
#[instrument(skip(state, patch))]
pub async fn upsert(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
    Json(patch): Json<SectionPatch>,
) -> Result<Json<SectionResponse>> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("Section id is required".to_string()));
    }
    let section = state.stores().content.upsert(&id, patch).await?;
    add_breadcrumb("content", &format!("Section {id} saved"));
    Ok(Json(SectionResponse {
        success: true,
        section,
    }))
}

/// DELETE /api/admin/content/{id}
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !state.stores().content.remove(&id).await? {
        return Err(AppError::NotFound("Section".to_string()));
    }
    add_breadcrumb("content", &format!("Section {id} removed"));
    Ok(Json(json!({ "success": true, "message": "Section removed" })))
}

/// Restore the default sections.
///
/// POST /api/admin/content/reset
#[instrument(skip(state))]
pub async fn reset(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<SectionListResponse>> {
    let sections = state.stores().content.reset().await?;
    tracing::info!(count = sections.len(), "Content reset to defaults");
    Ok(Json(SectionListResponse {
        success: true,
        sections,
    }))
}
