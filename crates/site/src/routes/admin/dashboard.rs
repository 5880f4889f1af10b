//! Admin dashboard summary.

use axum::{Json, extract::State};
use bikesdeal_core::contact::ContactStats;
use bikesdeal_core::lead::{LeadAnalytics, LeadStats};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SectionCounts {
    pub total: usize,
    pub visible: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub leads: LeadStats,
    pub analytics: LeadAnalytics,
    pub contacts: ContactStats,
    pub sections: SectionCounts,
}

/// GET /api/admin/dashboard
#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<DashboardResponse>> {
    let stores = state.stores();
    let sections = stores.content.all().await?;

    Ok(Json(DashboardResponse {
        success: true,
        leads: stores.leads.stats().await?,
        analytics: stores.leads.analytics(chrono::Utc::now()).await?,
        contacts: stores.contacts.stats().await?,
        sections: SectionCounts {
            total: sections.len(),
            visible: sections.visible_count(),
        },
    }))
}
