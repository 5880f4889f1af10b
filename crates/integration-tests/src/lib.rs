//! Integration tests for BikesDeal.
//!
//! Each test spawns the full site router on an ephemeral port with
//! in-memory storage and a temporary upload directory, then drives it over
//! HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bikesdeal-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::path::Path;

use bikesdeal_site::config::{AdminConfig, DEFAULT_LOGIN_PATH, SiteConfig};
use bikesdeal_site::db::Storage;
use bikesdeal_site::state::AppState;
use reqwest::Client;
use secrecy::SecretString;
use serde_json::json;
use tempfile::TempDir;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "integration-test-password";
pub const SESSION_SECRET: &str = "Zq8#mN2vR7xK4pL9wT3yB6cF1hJ5sD0g";

/// Admin settings matching the running test server.
#[must_use]
pub fn admin_config() -> AdminConfig {
    AdminConfig {
        username: ADMIN_USERNAME.to_string(),
        password: SecretString::from(ADMIN_PASSWORD),
        session_secret: SecretString::from(SESSION_SECRET),
        session_ttl_hours: 24,
        login_path: DEFAULT_LOGIN_PATH.to_string(),
    }
}

fn site_config(upload_dir: &Path) -> SiteConfig {
    SiteConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        base_url: url::Url::parse("http://127.0.0.1").expect("valid test base url"),
        database_url: None,
        admin: admin_config(),
        upload_dir: upload_dir.to_path_buf(),
        static_dir: upload_dir.to_path_buf(),
        trust_proxy_headers: false,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A running site server plus a cookie-keeping client.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub storage: Storage,
    pub uploads: TempDir,
}

impl TestContext {
    /// Spawn a server over fresh in-memory storage.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind or the client cannot be built.
    pub async fn new() -> Self {
        Self::with_storage(Storage::memory()).await
    }

    /// Spawn a server over `storage`, which tests may pre-populate.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind or the client cannot be built.
    pub async fn with_storage(storage: Storage) -> Self {
        let uploads = tempfile::tempdir().expect("Failed to create upload dir");
        let state = AppState::new(site_config(uploads.path()), storage.clone());
        let app = bikesdeal_site::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Test server error");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            storage,
            uploads,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Log in with the test credentials; the session cookies stay in the
    /// client's cookie store.
    ///
    /// # Panics
    ///
    /// Panics if the login request fails or is rejected.
    pub async fn login(&self) {
        let resp = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
            .send()
            .await
            .expect("Login request failed");
        assert_eq!(resp.status(), reqwest::StatusCode::OK, "login rejected");
    }
}
