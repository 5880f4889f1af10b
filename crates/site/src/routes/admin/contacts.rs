//! Admin contact-submission management.

use axum::{
    Json,
    extract::{Path, State},
};
use bikesdeal_core::contact::ContactSubmission;
use bikesdeal_core::types::ContactStatus;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ContactStatus,
}

#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub success: bool,
    pub total: usize,
    pub submissions: Vec<ContactSubmission>,
}

/// GET /api/admin/contacts
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<ContactListResponse>> {
    let submissions = state.stores().contacts.list().await?;
    Ok(Json(ContactListResponse {
        success: true,
        total: submissions.len(),
        submissions,
    }))
}

/// PUT /api/admin/contacts/{id}/status
#[instrument(skip(state))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Value>> {
    let submission = state
        .stores()
        .contacts
        .set_status(&id, update.status)
        .await?
        .ok_or_else(|| AppError::NotFound("Contact submission".to_string()))?;
    Ok(Json(json!({ "success": true, "submission": submission })))
}

/// DELETE /api/admin/contacts/{id}
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !state.stores().contacts.delete(&id).await? {
        return Err(AppError::NotFound("Contact submission".to_string()));
    }
    Ok(Json(json!({ "success": true, "message": "Contact submission deleted" })))
}
