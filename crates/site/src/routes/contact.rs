//! Contact form submissions from the public site.

use axum::{Json, extract::State};
use bikesdeal_core::contact::{ContactForm, ContactSubmission};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    pub submission_id: String,
    pub submission: ContactSubmission,
}

/// Submit the contact form.
///
/// POST /api/contact
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ContactResponse>> {
    let submission = form
        .into_submission(chrono::Utc::now())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    state.stores().contacts.add(submission.clone()).await?;

    Ok(Json(ContactResponse {
        success: true,
        message: "Thank you for your message! We will get back to you soon.",
        submission_id: submission.id.to_string(),
        submission,
    }))
}
