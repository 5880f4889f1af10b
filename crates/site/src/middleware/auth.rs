//! Admin session tokens, cookies, and the `RequireAdmin` extractor.
//!
//! A session is a pair of cookies:
//!
//! - `adminAuthToken` - `base64(username:issued_ms)` `.` hex HMAC-SHA256 of
//!   `payload|expiry`, keyed by the session secret
//! - `adminAuthExpiry` - expiry as epoch milliseconds
//!
//! Both are `HttpOnly`, `SameSite=Strict`, `Path=/`. The expiry cookie is
//! covered by the signature, so editing it invalidates the token.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderName, header, request::Parts},
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha2::Sha256;
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

use crate::config::{AdminConfig, SiteConfig};
use crate::error::AppError;
use crate::state::AppState;

pub const TOKEN_COOKIE: &str = "adminAuthToken";
pub const EXPIRY_COOKIE: &str = "adminAuthExpiry";

type HmacSha256 = Hmac<Sha256>;

/// Why a session was rejected. Clients only ever see "not authenticated".
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session cookies missing")]
    Missing,
    #[error("session expired")]
    Expired,
    #[error("session token malformed")]
    Malformed,
    #[error("session signature invalid")]
    BadSignature,
    #[error("session issued for another user")]
    WrongUser,
    #[error("session signing key rejected")]
    InvalidKey,
}

/// A verified admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub username: String,
    /// Epoch milliseconds.
    pub expires_at: i64,
}

/// A freshly issued token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

fn mac(
    secret: &SecretString,
    payload: &str,
    expires_at: i64,
) -> Result<HmacSha256, SessionError> {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .map_err(|_| SessionError::InvalidKey)?;
    mac.update(payload.as_bytes());
    mac.update(b"|");
    mac.update(expires_at.to_string().as_bytes());
    Ok(mac)
}

/// Constant-time string comparison to prevent timing attacks.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

/// Whether `username`/`password` match the configured admin.
#[must_use]
pub fn check_credentials(admin: &AdminConfig, username: &str, password: &str) -> bool {
    // Evaluate both so timing does not reveal which one failed.
    let user_ok = constant_time_compare(username, &admin.username);
    let password_ok = constant_time_compare(password, admin.password.expose_secret());
    user_ok & password_ok
}

/// Issue a token for the configured admin, valid for the session TTL.
///
/// # Errors
///
/// [`SessionError::InvalidKey`] if the signing key is rejected.
pub fn issue_token(admin: &AdminConfig, now_ms: i64) -> Result<IssuedToken, SessionError> {
    let expires_at = now_ms + i64::from(admin.session_ttl_hours) * 60 * 60 * 1000;
    let payload = STANDARD.encode(format!("{}:{now_ms}", admin.username));
    let signature = hex::encode(
        mac(&admin.session_secret, &payload, expires_at)?
            .finalize()
            .into_bytes(),
    );

    Ok(IssuedToken {
        token: format!("{payload}.{signature}"),
        expires_at,
    })
}

/// Verify a token/expiry cookie pair.
///
/// `now_ms >= expiry` is expired. The signature is checked before the
/// payload is decoded.
///
/// # Errors
///
/// Returns the [`SessionError`] describing the first failed check.
pub fn verify_token(
    admin: &AdminConfig,
    token: &str,
    expiry: &str,
    now_ms: i64,
) -> Result<AdminSession, SessionError> {
    let expires_at: i64 = expiry.trim().parse().map_err(|_| SessionError::Malformed)?;
    if now_ms >= expires_at {
        return Err(SessionError::Expired);
    }

    let (payload, signature) = token.split_once('.').ok_or(SessionError::Malformed)?;
    let signature = hex::decode(signature).map_err(|_| SessionError::Malformed)?;
    mac(&admin.session_secret, payload, expires_at)?
        .verify_slice(&signature)
        .map_err(|_| SessionError::BadSignature)?;

    let decoded = STANDARD
        .decode(payload)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or(SessionError::Malformed)?;
    let (username, _issued) = decoded.rsplit_once(':').ok_or(SessionError::Malformed)?;
    if !constant_time_compare(username, &admin.username) {
        return Err(SessionError::WrongUser);
    }

    Ok(AdminSession {
        username: username.to_owned(),
        expires_at,
    })
}

/// Value of the cookie `name` in the request headers.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_owned())
}

/// Verify the session carried by a request's cookies.
///
/// # Errors
///
/// [`SessionError::Missing`] unless both cookies are present, otherwise as
/// [`verify_token`].
pub fn session_from_headers(
    admin: &AdminConfig,
    headers: &HeaderMap,
    now_ms: i64,
) -> Result<AdminSession, SessionError> {
    let token = cookie_value(headers, TOKEN_COOKIE).filter(|v| !v.is_empty());
    let expiry = cookie_value(headers, EXPIRY_COOKIE).filter(|v| !v.is_empty());
    let (Some(token), Some(expiry)) = (token, expiry) else {
        return Err(SessionError::Missing);
    };
    verify_token(admin, &token, &expiry, now_ms)
}

fn session_cookie(
    config: &SiteConfig,
    name: &'static str,
    value: String,
    max_age: Duration,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(config.secure_cookies())
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(max_age)
        .build()
}

/// `Set-Cookie` headers establishing a session.
#[must_use]
pub fn login_cookies(config: &SiteConfig, issued: &IssuedToken) -> [(HeaderName, String); 2] {
    let max_age = Duration::hours(i64::from(config.admin.session_ttl_hours));
    [
        (
            header::SET_COOKIE,
            session_cookie(config, TOKEN_COOKIE, issued.token.clone(), max_age).to_string(),
        ),
        (
            header::SET_COOKIE,
            session_cookie(config, EXPIRY_COOKIE, issued.expires_at.to_string(), max_age)
                .to_string(),
        ),
    ]
}

/// `Set-Cookie` headers clearing the session.
#[must_use]
pub fn logout_cookies(config: &SiteConfig) -> [(HeaderName, String); 2] {
    [TOKEN_COOKIE, EXPIRY_COOKIE].map(|name| {
        (
            header::SET_COOKIE,
            session_cookie(config, name, String::new(), Duration::ZERO).to_string(),
        )
    })
}

/// Extractor that requires a valid admin session.
///
/// Rejects with 401 JSON; the reason is logged, never returned.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAdmin(session): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", session.username)
/// }
/// ```
pub struct RequireAdmin(pub AdminSession);

/// Error returned when an admin session is required but missing or invalid.
pub struct AdminAuthRejection(SessionError);

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self.0, "Admin request rejected");
        AppError::Unauthorized(self.0.to_string()).into_response()
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        session_from_headers(&state.config().admin, &parts.headers, now_ms)
            .map(Self)
            .map_err(AdminAuthRejection)
    }
}
