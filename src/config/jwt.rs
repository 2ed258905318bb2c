//! # JWT Configuration
//!
//! The signing secret is process-wide and read once at startup. It is never
//! read from the environment by the auth code itself: callers pass a
//! [`JwtConfig`] (or just its secret) explicitly.

use chrono::Duration;

use crate::config::env::{read_string_or_from, read_u32_from};

/// Secret used when `JWT_SECRET` is unset or blank.
///
/// Acceptable for local development only.
pub const DEFAULT_JWT_SECRET: &str = "dev-secret-change-me";

/// Default token lifetime in days.
pub const DEFAULT_JWT_EXPIRES_DAYS: u32 = 7;

/// Signing secret and default token lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in: Duration,
}

impl JwtConfig {
    /// Builds a config with an explicit secret and the default lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expires_in: Duration::days(DEFAULT_JWT_EXPIRES_DAYS as i64),
        }
    }

    /// Reads `JWT_SECRET` and `JWT_EXPIRES_DAYS`.
    pub fn from_env() -> Self {
        Self::from_provider(|k| std::env::var(k).ok())
    }

    /// Provider-based variant of [`JwtConfig::from_env`].
    pub fn from_provider<F>(provider: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = read_string_or_from(&provider, "JWT_SECRET", DEFAULT_JWT_SECRET);
        let days = read_u32_from(&provider, "JWT_EXPIRES_DAYS", DEFAULT_JWT_EXPIRES_DAYS);

        Self {
            secret,
            expires_in: Duration::days(days as i64),
        }
    }

    /// Returns `true` when running with the development fallback secret.
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::new(DEFAULT_JWT_SECRET)
    }
}

// The secret must never end up in logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
