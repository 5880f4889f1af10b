//! Admin export and import of site data.

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use bikesdeal_core::export::{ExportType, ImportBundle, ImportSummary};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAdmin;
use crate::portability;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub message: String,
    pub imported: ImportSummary,
}

/// Download a JSON bundle. `type` is one of `all` (default), `submissions`,
/// `content` or `settings`.
///
/// GET /api/admin/export?type=
#[instrument(skip(state))]
pub async fn export(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let kind = match query.kind.as_deref().map(str::trim) {
        None | Some("") => ExportType::All,
        Some(raw) => raw.parse::<ExportType>().map_err(AppError::BadRequest)?,
    };
    let now = Utc::now();
    let bundle = portability::export(state.stores(), kind, now).await?;
    let body = serde_json::to_string_pretty(&bundle)
        .map_err(|e| AppError::Internal(format!("Failed to encode export: {e}")))?;

    add_breadcrumb("data", &format!("Exported {kind}"));
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", kind.filename(now)),
            ),
        ],
        body,
    ))
}

/// Replace stored collections with those in an uploaded bundle.
///
/// POST /api/admin/import
#[instrument(skip(state, payload))]
pub async fn import(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(payload): Json<Value>,
) -> Result<Json<ImportResponse>> {
    let bundle = ImportBundle::parse(payload)?;
    let imported = portability::import(state.stores(), bundle).await?;
    add_breadcrumb("data", &format!("Imported {}", imported.describe()));

    Ok(Json(ImportResponse {
        success: true,
        message: format!("Successfully imported: {}", imported.describe()),
        imported,
    }))
}
