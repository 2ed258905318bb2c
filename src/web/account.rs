//! Handlers for the signed-in user. They rely on the router to run the
//! matching auth middleware first.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    auth::{middleware::AuthState, principal::CurrentUser, role::CapabilityClass},
    error::api::ApiError,
};

/// Body of `GET /me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub role: Option<String>,
    pub plan: Option<String>,
    pub capability: CapabilityClass,
    pub is_admin: bool,
}

/// `GET /me`: the caller's account with its capability class and whether
/// its e-mail is on the admin allow-list.
pub async fn me(
    State(state): State<AuthState>,
    user: CurrentUser,
) -> Result<Json<MeResponse>, ApiError> {
    let account = state
        .accounts
        .find_account(&user.subject)
        .await?
        .ok_or(ApiError::NotFound)?;

    let capability = account.capability();
    let is_admin = account
        .email
        .as_deref()
        .is_some_and(|email| state.admins.contains(email));
    Ok(Json(MeResponse {
        id: account.id,
        email: account.email,
        email_verified: account.email_verified,
        role: account.role,
        plan: account.plan,
        capability,
        is_admin,
    }))
}

/// `GET /me/verified`: succeeds only behind `require_verified`.
pub async fn verified(user: CurrentUser) -> Json<Value> {
    Json(json!({ "ok": true, "id": user.subject }))
}

/// `GET /admin/ping`
pub async fn admin_ping() -> Json<Value> {
    Json(json!({ "ok": true }))
}
