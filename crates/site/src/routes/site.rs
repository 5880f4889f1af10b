//! Public read endpoints for site content.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use bikesdeal_core::content::{ContentFilter, ContentSection, ResolvedSite, resolve};
use bikesdeal_core::settings::SiteSettings;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// The fully resolved site model: every block with overrides applied.
///
/// GET /api/site
#[instrument(skip(state))]
pub async fn site(State(state): State<AppState>) -> Result<Json<ResolvedSite>> {
    let stores = state.stores();
    let sections = stores.content.all().await?;
    let settings = stores.settings.get().await?;
    Ok(Json(resolve(sections.as_slice(), settings)))
}

/// Content sections sorted by order.
///
/// GET /api/content?visible=true
#[instrument(skip(state))]
pub async fn list_sections(
    State(state): State<AppState>,
    Query(filter): Query<ContentFilter>,
) -> Result<Json<Vec<ContentSection>>> {
    Ok(Json(state.stores().content.list(filter).await?))
}

/// GET /api/content/{id}
#[instrument(skip(state))]
pub async fn get_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContentSection>> {
    state
        .stores()
        .content
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Section".to_string()))
}

/// GET /api/settings
#[instrument(skip(state))]
pub async fn settings(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    Ok(Json(state.stores().settings.get().await?))
}
