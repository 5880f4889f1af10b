//! Navigation gate for the admin console pages.
//!
//! Runs on every request. API routes, uploads, and paths that look like
//! files pass straight through; the admin tree and the login page are
//! redirected according to the session and receive the admin security
//! headers.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::auth::session_from_headers;
use super::security_headers::apply_admin_headers;
use crate::state::AppState;

/// Path prefix of the gated admin pages.
pub const ADMIN_PREFIX: &str = "/admin";

/// What the gate does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Not an admin page; leave untouched.
    PassThrough,
    /// Admin page or login page the caller may see.
    Allow,
    Redirect(String),
}

fn is_bypassed(path: &str) -> bool {
    path.starts_with("/api/")
        || path.starts_with("/uploads/")
        || path.starts_with("/static/")
        || path.contains('.')
}

/// Plain prefix match, so `/administrator` and `/admin-tools` are gated too.
fn is_admin_path(path: &str) -> bool {
    path.starts_with(ADMIN_PREFIX)
}

/// Decide how to treat `path` given whether the caller holds a valid session.
#[must_use]
pub fn decide(path: &str, login_path: &str, authenticated: bool) -> GateDecision {
    if is_bypassed(path) {
        return GateDecision::PassThrough;
    }
    if path == login_path {
        return if authenticated {
            GateDecision::Redirect(ADMIN_PREFIX.to_owned())
        } else {
            GateDecision::Allow
        };
    }
    if is_admin_path(path) {
        return if authenticated {
            GateDecision::Allow
        } else {
            GateDecision::Redirect(login_path.to_owned())
        };
    }
    GateDecision::PassThrough
}

/// Middleware enforcing [`decide`].
pub async fn admin_gate_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let admin = &state.config().admin;
    if is_bypassed(&path) || (path != admin.login_path && !is_admin_path(&path)) {
        return next.run(request).await;
    }

    let now_ms = chrono::Utc::now().timestamp_millis();
    let authenticated = session_from_headers(admin, request.headers(), now_ms).is_ok();

    match decide(&path, &admin.login_path, authenticated) {
        GateDecision::PassThrough => next.run(request).await,
        GateDecision::Allow => {
            let mut response = next.run(request).await;
            apply_admin_headers(response.headers_mut());
            response
        }
        GateDecision::Redirect(to) => {
            tracing::debug!(%path, %to, "Admin gate redirect");
            let mut response = Redirect::to(&to).into_response();
            apply_admin_headers(response.headers_mut());
            response
        }
    }
}
