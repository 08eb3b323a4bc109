//! Shared-secret header check for authenticated routes
//!
//! Generated wrappers for routes declared with `"auth": true` call
//! [`AuthGuard::authorize`] before touching any parameter. The guard is owned
//! by the host and borrowed per request; neither the header name nor the
//! secret ever appears in generated code.

use secrecy::{ExposeSecret, SecretString};

use crate::error::ApiError;
use crate::request::Request;

/// Header checked when none is configured.
pub const DEFAULT_AUTH_HEADER: &str = "X-Auth";

/// Environment variable overriding the auth header name.
pub const AUTH_HEADER_ENV: &str = "APIGEN_AUTH_HEADER";

/// Environment variable holding the shared secret.
pub const AUTH_SECRET_ENV: &str = "APIGEN_AUTH_SECRET";

/// Compares a request header against a shared secret.
///
/// A guard without a secret refuses every authenticated request.
///
/// # Example
/// ```rust
/// use apigen::{AuthGuard, Request};
///
/// let guard = AuthGuard::new("100500");
/// assert!(guard.authorize(&Request::get("/").header("X-Auth", "100500")).is_ok());
/// assert!(guard.authorize(&Request::get("/")).is_err());
/// ```
#[derive(Debug)]
pub struct AuthGuard {
    header: String,
    secret: Option<SecretString>,
}

impl AuthGuard {
    /// Guard checking the default header against `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            header: DEFAULT_AUTH_HEADER.to_string(),
            secret: Some(SecretString::from(secret.into())),
        }
    }

    /// Guard that refuses every authenticated request.
    pub fn deny_all() -> Self {
        Self {
            header: DEFAULT_AUTH_HEADER.to_string(),
            secret: None,
        }
    }

    /// Build a guard from `APIGEN_AUTH_HEADER` and `APIGEN_AUTH_SECRET`.
    pub fn from_env() -> Self {
        let header = std::env::var(AUTH_HEADER_ENV)
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTH_HEADER.to_string());

        let secret = std::env::var(AUTH_SECRET_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .map(SecretString::from);

        if secret.is_none() {
            tracing::warn!(
                env = AUTH_SECRET_ENV,
                "no auth secret configured, authenticated routes will be refused"
            );
        }

        Self { header, secret }
    }

    /// Replace the header that carries the secret.
    #[must_use = "This method returns a new AuthGuard and does not modify self"]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Name of the header carrying the secret.
    pub fn header_name(&self) -> &str {
        &self.header
    }

    /// Returns true if a secret is configured.
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Check the request's auth header.
    ///
    /// Fails with `403 Forbidden` when no secret is configured, the header is
    /// missing, or its value does not match.
    pub fn authorize(&self, req: &Request) -> Result<(), ApiError> {
        let Some(secret) = &self.secret else {
            tracing::trace!(path = req.path(), "auth refused, no secret configured");
            return Err(ApiError::forbidden("unauthorized"));
        };

        match req.header_value(&self.header) {
            Some(value) if constant_time_eq(value.as_bytes(), secret.expose_secret().as_bytes()) => {
                Ok(())
            }
            _ => {
                tracing::trace!(path = req.path(), header = %self.header, "auth refused");
                Err(ApiError::forbidden("unauthorized"))
            }
        }
    }
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self::deny_all()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
