//! Admin console API.
//!
//! Every handler takes [`RequireAdmin`](crate::middleware::RequireAdmin), so
//! a missing or invalid session answers 401 before any store is touched.

pub mod contacts;
pub mod content;
pub mod dashboard;
pub mod data;
pub mod leads;
pub mod settings;

use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};

use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Routes nested under `/api/admin`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route("/leads", get(leads::list))
        .route("/leads/{id}", get(leads::get).delete(leads::delete))
        .route("/leads/{id}/status", put(leads::set_status))
        .route("/contacts", get(contacts::list))
        .route("/contacts/{id}", delete(contacts::delete))
        .route("/contacts/{id}/status", put(contacts::set_status))
        .route("/content", get(content::list).post(content::add))
        .route("/content/reset", post(content::reset))
        .route("/content/{id}", put(content::upsert).delete(content::remove))
        .route("/settings", put(settings::update))
        .route(
            "/background-video",
            get(settings::background_video).put(settings::set_background_video),
        )
        .route("/export", get(data::export))
        .route("/import", post(data::import))
}

/// Admin console landing. The navigation gate has already redirected
/// anonymous callers; rendering the console is left to the frontend.
///
/// GET /admin, GET /admin/{*rest}
pub async fn console(RequireAdmin(session): RequireAdmin) -> Json<Value> {
    Json(json!({
        "page": "admin",
        "user": { "username": session.username },
        "expiresAt": session.expires_at,
    }))
}

/// Login landing page.
///
/// GET <login path>
pub async fn login_page(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "page": "login",
        "action": "/api/auth/login",
        "loginPath": state.config().admin.login_path,
    }))
}
