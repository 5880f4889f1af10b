//! Admin site settings and background video.

use axum::{Json, extract::State};
use bikesdeal_core::settings::{BackgroundVideo, SettingsPatch, SiteSettings};
use serde::Serialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub success: bool,
    pub settings: SiteSettings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub success: bool,
    pub background_video: BackgroundVideo,
}

/// PUT /api/admin/settings
#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<SettingsResponse>> {
    let settings = state.stores().settings.update(patch).await?;
    add_breadcrumb("settings", "Site settings updated");
    Ok(Json(SettingsResponse {
        success: true,
        settings,
    }))
}

/// GET /api/admin/background-video
#[instrument(skip(state))]
pub async fn background_video(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<VideoResponse>> {
    Ok(Json(VideoResponse {
        success: true,
        background_video: state.stores().settings.background_video().await?,
    }))
}

/// Opacity is clamped into `0.0..=1.0` before it is stored.
///
/// PUT /api/admin/background-video
#[instrument(skip(state))]
pub async fn set_background_video(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(video): Json<BackgroundVideo>,
) -> Result<Json<VideoResponse>> {
    let background_video = state.stores().settings.set_background_video(video).await?;
    Ok(Json(VideoResponse {
        success: true,
        background_video,
    }))
}
