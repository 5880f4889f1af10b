//! BikesDeal site library.
//!
//! The public marketing API, the signed-cookie admin session, and the
//! admin console API. Exposed as a library so the CLI and the integration
//! tests can build the same router and stores the binary serves.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod portability;
pub mod routes;
pub mod state;
pub mod stores;
pub mod uploads;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{admin_gate_middleware, request_id_middleware};
use crate::state::AppState;

/// Build the application router with its middleware stack.
///
/// Sentry layers are added by the binary on top of this. Serve with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the login rate
/// limiter can key on the peer address.
pub fn app(state: AppState) -> Router {
    let upload_dir = state.config().upload_dir.clone();
    let static_dir = state.config().static_dir.clone();
    let login_path = state.config().admin.login_path.clone();
    let trust_proxy_headers = state.config().trust_proxy_headers;

    routes::routes(&login_path, trust_proxy_headers)
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            admin_gate_middleware,
        ))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{AdminConfig, DEFAULT_LOGIN_PATH, SiteConfig};
    use crate::db::Storage;

    fn test_state(upload_dir: &std::path::Path) -> AppState {
        let config = SiteConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: url::Url::parse("http://localhost:3000").unwrap(),
            database_url: None,
            admin: AdminConfig {
                username: "admin".to_string(),
                password: SecretString::from("correct horse battery staple"),
                session_secret: SecretString::from("k3Jx9QvL2mN8pR5tW7yZ1aB4cD6eF0gH"),
                session_ttl_hours: 24,
                login_path: DEFAULT_LOGIN_PATH.to_string(),
            },
            upload_dir: upload_dir.to_path_buf(),
            static_dir: upload_dir.to_path_buf(),
            trust_proxy_headers: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        AppState::new(config, Storage::memory())
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(test_state(dir.path()))
            .oneshot(
                Request::get("/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_anonymous_admin_page_redirects_to_login() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(test_state(dir.path()))
            .oneshot(Request::get("/admin/leads").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[header::LOCATION], DEFAULT_LOGIN_PATH);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_admin_api_requires_session() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(test_state(dir.path()))
            .oneshot(
                Request::get("/api/admin/dashboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
