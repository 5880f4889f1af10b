//! Admin login, session verification, and logout.
//!
//! These endpoints answer with `{"message": ...}` bodies rather than the
//! `{"success", "error"}` shape used elsewhere; the console keys off the
//! status code.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::error::{AppError, add_breadcrumb};
use crate::middleware::auth::{
    check_credentials, issue_token, login_cookies, logout_cookies, session_from_headers,
};
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Handle admin login.
///
/// POST /api/auth/login
#[instrument(skip(state, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Response, AppError> {
    let config = state.config();
    if !check_credentials(&config.admin, &form.username, &form.password) {
        tracing::warn!("Admin login failed");
        return Ok(message(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }

    let now_ms = chrono::Utc::now().timestamp_millis();
    let issued = issue_token(&config.admin, now_ms)
        .map_err(|e| AppError::Internal(format!("failed to issue session token: {e}")))?;

    tracing::info!(expires_at = issued.expires_at, "Admin logged in");
    add_breadcrumb("auth", "Admin logged in");

    Ok((
        AppendHeaders(login_cookies(config, &issued)),
        Json(json!({ "message": "Authentication successful" })),
    )
        .into_response())
}

/// Report whether the request carries a valid admin session.
///
/// GET /api/auth/verify
#[instrument(skip_all)]
pub async fn verify(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let now_ms = chrono::Utc::now().timestamp_millis();
    match session_from_headers(&state.config().admin, &headers, now_ms) {
        Ok(session) => Json(json!({
            "message": "Authenticated",
            "user": { "username": session.username },
            "expiresAt": session.expires_at,
        }))
        .into_response(),
        Err(reason) => {
            tracing::debug!(%reason, "Session verification failed");
            message(StatusCode::UNAUTHORIZED, "Not authenticated")
        }
    }
}

/// Clear the admin session cookies.
///
/// POST /api/auth/logout
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("Admin logged out");
    (
        AppendHeaders(logout_cookies(state.config())),
        Json(json!({ "message": "Logout successful" })),
    )
}
