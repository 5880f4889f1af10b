//! Admin lead management.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use bikesdeal_core::lead::{LeadFilter, LeadSubmission};
use bikesdeal_core::types::LeadStatus;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Query string for the lead list. `status=all` (or empty) means no
/// status filter.
#[derive(Debug, Default, Deserialize)]
pub struct LeadQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

impl LeadQuery {
    fn into_filter(self) -> Result<LeadFilter> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("" | "all") => None,
            Some(raw) => Some(raw.parse::<LeadStatus>().map_err(AppError::BadRequest)?),
        };
        Ok(LeadFilter {
            status,
            search: self.search,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: LeadStatus,
}

#[derive(Debug, Serialize)]
pub struct LeadListResponse {
    pub success: bool,
    pub total: usize,
    pub leads: Vec<LeadSubmission>,
}

#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub success: bool,
    pub lead: LeadSubmission,
}

/// GET /api/admin/leads?status=&search=
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Query(query): Query<LeadQuery>,
) -> Result<Json<LeadListResponse>> {
    let leads = state.stores().leads.list(&query.into_filter()?).await?;
    Ok(Json(LeadListResponse {
        success: true,
        total: leads.len(),
        leads,
    }))
}

/// GET /api/admin/leads/{id}
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<LeadResponse>> {
    let lead = state
        .stores()
        .leads
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead".to_string()))?;
    Ok(Json(LeadResponse {
        success: true,
        lead,
    }))
}

/// PUT /api/admin/leads/{id}/status
#[instrument(skip(state))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<LeadResponse>> {
    let lead = state
        .stores()
        .leads
        .set_status(&id, update.status)
        .await?
        .ok_or_else(|| AppError::NotFound("Lead".to_string()))?;
    add_breadcrumb("leads", &format!("Lead {id} marked {}", update.status));
    Ok(Json(LeadResponse {
        success: true,
        lead,
    }))
}

/// DELETE /api/admin/leads/{id}
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    if !state.stores().leads.delete(&id).await? {
        return Err(AppError::NotFound("Lead".to_string()));
    }
    Ok(Json(json!({ "success": true, "message": "Lead deleted" })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_all_means_no_status() {
        let filter = LeadQuery {
            status: Some("all".to_string()),
            search: Some("classic".to_string()),
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.status, None);
        assert_eq!(filter.search.as_deref(), Some("classic"));
    }

    #[test]
    fn test_query_status_parsed() {
        let filter = LeadQuery {
            status: Some("approved".to_string()),
            search: None,
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.status, Some(LeadStatus::Approved));

        assert!(
            LeadQuery {
                status: Some("sold".to_string()),
                search: None,
            }
            .into_filter()
            .is_err()
        );
    }
}
