//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness probe
//! GET  /health/ready                - Readiness probe (storage ping)
//!
//! # Public
//! GET  /api/site                    - Resolved site model
//! GET  /api/content?visible=true    - Content sections
//! GET  /api/content/{id}            - One content section
//! GET  /api/settings                - Effective site settings
//! POST /api/contact                 - Contact form submission
//! POST /api/leads                   - Bike lead submission
//! GET  /uploads/*                   - Uploaded media (static)
//!
//! # Auth
//! POST /api/auth/login              - Issue session cookies (rate limited)
//! GET  /api/auth/verify             - Check the session
//! POST /api/auth/logout             - Clear session cookies
//!
//! # Admin (requires session)
//! GET  /api/admin/dashboard         - Lead, contact and section counts
//! GET  /api/admin/leads             - Leads (?status=&search=)
//! GET  /api/admin/leads/{id}        - One lead
//! PUT  /api/admin/leads/{id}/status - Change lead status
//! DEL  /api/admin/leads/{id}        - Delete lead
//! GET  /api/admin/contacts          - Contact submissions
//! PUT  /api/admin/contacts/{id}/status
//! DEL  /api/admin/contacts/{id}
//! GET  /api/admin/content           - All sections
//! POST /api/admin/content           - Add custom section
//! PUT  /api/admin/content/{id}      - Upsert section
//! DEL  /api/admin/content/{id}      - Remove section
//! POST /api/admin/content/reset     - Restore defaults
//! PUT  /api/admin/settings          - Update site settings
//! GET  /api/admin/background-video
//! PUT  /api/admin/background-video
//! GET  /api/admin/export?type=      - Download JSON bundle
//! POST /api/admin/import            - Import JSON bundle
//! POST /api/upload                  - Upload image/video (multipart)
//! GET  /api/upload?type=            - List uploads
//! DEL  /api/upload?filename&type    - Delete upload
//!
//! # Pages (gated)
//! GET  /admin, /admin/*             - Admin console landing
//! GET  <login path>                 - Login landing
//! ```

pub mod admin;
pub mod auth;
pub mod contact;
pub mod health;
pub mod leads;
pub mod site;
pub mod upload;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::middleware::login_rate_limiter;
use crate::state::AppState;

/// Public read and submission endpoints.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/site", get(site::site))
        .route("/api/content", get(site::list_sections))
        .route("/api/content/{id}", get(site::get_section))
        .route("/api/settings", get(site::settings))
        .route("/api/contact", post(contact::submit))
        .route("/api/leads", post(leads::submit))
}

/// Login, verify and logout. Login is rate limited per client IP, read
/// from proxy headers only when `trust_proxy_headers` is set.
pub fn auth_routes(trust_proxy_headers: bool) -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            post(auth::login).layer(login_rate_limiter(trust_proxy_headers)),
        )
        .route("/verify", get(auth::verify))
        .route("/logout", post(auth::logout))
}

/// Upload endpoints, with a body limit sized for the largest video.
pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(upload::upload).get(upload::list).delete(upload::delete),
        )
        .layer(DefaultBodyLimit::max(upload::UPLOAD_BODY_LIMIT))
}

/// Every route of the site. `login_path` is the configured login page.
pub fn routes(login_path: &str, trust_proxy_headers: bool) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(public_routes())
        .nest("/api/auth", auth_routes(trust_proxy_headers))
        .nest("/api/admin", admin::routes())
        .nest("/api/upload", upload_routes())
        .route("/admin", get(admin::console))
        .route("/admin/{*rest}", get(admin::console))
        .route(login_path, get(admin::login_page))
}
