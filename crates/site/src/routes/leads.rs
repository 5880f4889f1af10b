//! Sell-your-bike lead submissions from the public site.

use axum::{Json, extract::State, http::StatusCode};
use bikesdeal_core::lead::{LeadSubmission, NewLead};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub success: bool,
    pub message: &'static str,
    pub lead: LeadSubmission,
}

/// Submit a bike for sale.
///
/// POST /api/leads
#[instrument(skip(state, lead), fields(brand = %lead.bike_details.brand, model = %lead.bike_details.model))]
pub async fn submit(
    State(state): State<AppState>,
    Json(lead): Json<NewLead>,
) -> Result<(StatusCode, Json<LeadResponse>)> {
    let now = chrono::Utc::now();
    let lead = lead
        .validate(now)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let lead = state.stores().leads.create(lead, now).await?;

    Ok((
        StatusCode::CREATED,
        Json(LeadResponse {
            success: true,
            message: "Your bike has been submitted. Our team will contact you shortly.",
            lead,
        }),
    ))
}
