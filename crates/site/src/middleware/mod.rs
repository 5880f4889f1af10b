//! HTTP middleware stack for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (`x-request-id`, recorded on the span)
//! 4. Admin gate (redirects for `/admin` and the login page, admin
//!    security headers)
//! 5. Rate limiting on `POST /api/auth/login` (governor)
//!
//! Admin API handlers authenticate with the [`RequireAdmin`] extractor.

pub mod admin_gate;
pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use admin_gate::admin_gate_middleware;
pub use auth::{AdminSession, RequireAdmin};
pub use rate_limit::login_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::apply_admin_headers;
