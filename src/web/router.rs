//! # Application router
//!
//! | Route | Middleware |
//! |-------|------------|
//! | `GET /health` | none |
//! | `GET /me` | authenticate, require_auth |
//! | `GET /me/verified` | authenticate, require_auth, require_verified |
//! | `GET /admin/ping` | authenticate, require_admin |
//!
//! `authenticate` wraps the whole router, so every handler (and the
//! fallback) sees the identity when the token verified.

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    auth::middleware::{authenticate, require_admin, require_auth, require_verified, AuthState},
    config::app::AppConfig,
    web::{account, cors::build_cors, fallback::not_found, health::health},
};

pub fn app_router(state: AuthState, cfg: &AppConfig) -> Router {
    let signed_in = Router::new()
        .route("/me", get(account::me))
        .route_layer(from_fn(require_auth));

    let verified = Router::new()
        .route("/me/verified", get(account::verified))
        .route_layer(from_fn_with_state(state.clone(), require_verified))
        .route_layer(from_fn(require_auth));

    let admin = Router::new()
        .route("/admin/ping", get(account::admin_ping))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(health))
        .merge(signed_in)
        .merge(verified)
        .merge(admin)
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), authenticate))
        .layer(DefaultBodyLimit::max(cfg.http.max_body_bytes))
        .layer(build_cors(&cfg.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
