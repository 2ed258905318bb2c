//! # Application Configuration Loader
//!
//! Loads every setting the API needs in one place. Outside production the
//! loader first reads a dotenv file: `DOTENV_FILE` if set, otherwise
//! `.env.{APP_ENV}` falling back to `.env`.
//!
//! Initialized once at startup and shared read-only afterwards.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `APP_ENV` | `development`, `production`, ... | `"development"` |
//! | `DOTENV_FILE` | Optional path to a custom dotenv file | *none* |
//! | `JWT_SECRET` | HMAC secret for access tokens | `"dev-secret-change-me"` |
//! | `JWT_EXPIRES_DAYS` | Lifetime of issued tokens | `7` |
//! | `DATABASE_URL` | MySQL connection URL | *none* (in-memory store) |
//! | `DATABASE_MAX_CONN` | Pool upper bound | driver default |
//! | `ALLOWED_ORIGINS` | Comma-separated CORS origins, `*` for any | any |
//! | `ADMIN_EMAILS` | Comma-separated admin allow-list | empty |
//! | `HOST` / `PORT` | Listener address | `0.0.0.0` / `4000` |
//! | `HTTP_MAX_BODY_BYTES` | Maximum request body size (bytes) | from `HTTP_MAX_BODY_MB` |
//! | `HTTP_MAX_BODY_MB` | Max body size in megabytes | `5` |
//!
//! # Example
//! ```rust,no_run
//! use varsityhub_api::config::app::AppConfig;
//!
//! let cfg = AppConfig::from_env();
//! if cfg.jwt.uses_default_secret() {
//!     eprintln!("JWT_SECRET is not set");
//! }
//! ```

use std::env;

use crate::config::{
    db::DbConfig,
    env::read_list_from,
    jwt::JwtConfig,
    web::{CorsConfig, HttpConfig},
};

/// Top-level application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub app_env: String,
    pub jwt: JwtConfig,
    pub db: DbConfig,
    pub http: HttpConfig,
    pub cors: CorsConfig,
    /// Lowercased admin e-mail allow-list.
    pub admin_emails: Vec<String>,
}

impl AppConfig {
    /// Loads configuration from the process environment (after dotenv).
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        if app_env != "production" {
            if let Ok(path) = env::var("DOTENV_FILE") {
                let _ = dotenvy::from_filename(path);
            } else {
                let candidate = format!(".env.{}", app_env);
                dotenvy::from_filename(&candidate)
                    .or_else(|_| dotenvy::dotenv())
                    .ok();
            }
        }

        Self::from_provider(app_env, |k| env::var(k).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_provider<F>(app_env: impl Into<String>, provider: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_emails = read_list_from(&provider, "ADMIN_EMAILS")
            .into_iter()
            .map(|e| e.to_lowercase())
            .collect();

        AppConfig {
            app_env: app_env.into(),
            jwt: JwtConfig::from_provider(&provider),
            db: DbConfig::from_provider(&provider),
            http: HttpConfig::from_provider(&provider),
            cors: CorsConfig::from_provider(&provider),
            admin_emails,
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
