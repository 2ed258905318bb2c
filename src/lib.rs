//! # varsityhub_api
//!
//! Request authentication and capability classification for the
//! VarsityHub API.
//!
//! - Bearer-token verification and the axum authenticator chain (`auth`)
//! - Coach / fan classification from free-text role and plan (`auth::role`)
//! - Read-only account store port with MySQL and in-memory adapters (`account`)
//! - Environment-driven configuration (`config`)
//! - JSON error responses (`error`) and the HTTP router (`web`)
//!
//! ## Example usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use varsityhub_api::account::memory::InMemoryAccountStore;
//! use varsityhub_api::auth::AuthState;
//! use varsityhub_api::config::app::AppConfig;
//! use varsityhub_api::web::app_router;
//!
//! let cfg = AppConfig::from_env();
//! let state = AuthState::from_config(&cfg, Arc::new(InMemoryAccountStore::new()));
//! let app = app_router(state, &cfg);
//! ```

// ===============================
// Re-exports of external crates
// ===============================

pub use anyhow;
pub use axum;
pub use chrono;
pub use dotenvy;
pub use jsonwebtoken;
pub use mysql;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower;
pub use tower_http;

// ===============================
// Public modules
// ===============================
pub mod account;
pub mod auth;
pub mod config;
pub mod error;
pub mod web;
