//! Authentication and capability classification.
//!
//! - [`jwt`] — issue and verify access tokens
//! - [`credential`] — bearer header parsing, verification outcome
//! - [`middleware`] — the axum authenticator chain
//! - [`role`] — coach / fan classification

pub mod admin;
pub mod credential;
pub mod jwt;
pub mod middleware;
pub mod principal;
pub mod role;

pub use middleware::AuthState;
pub use principal::CurrentUser;
pub use role::CapabilityClass;
