//! # Authenticator chain
//!
//! Independently composable axum middleware:
//!
//! | Function | Rejects with |
//! |----------|--------------|
//! | [`authenticate`] | never |
//! | [`require_auth`] | 401 `Unauthorized` |
//! | [`require_verified`] | 401 without identity, 403 `Email verification required` |
//! | [`require_admin`] | 401 without identity, 403 `Admin only` |
//!
//! [`authenticate`] runs on every request and only attaches a
//! [`CurrentUser`] extension when the bearer token verifies. The `require_*`
//! layers are terminal: they answer the request themselves instead of
//! calling the inner service.
//!
//! An account store failure in [`require_verified`] or [`require_admin`]
//! fails closed with a 500.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/posts", post(create_post))
//!     .route_layer(from_fn_with_state(state.clone(), require_verified))
//!     .route_layer(from_fn(require_auth));
//!
//! let app = Router::new()
//!     .merge(protected)
//!     .layer(from_fn_with_state(state.clone(), authenticate))
//!     .with_state(state);
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{
    account::AccountStore,
    auth::{
        admin::AdminEmails,
        credential::{resolve_credential, Credential},
        principal::CurrentUser,
    },
    config::{app::AppConfig, jwt::JwtConfig},
    error::api::ApiError,
};

/// Read-only state shared by the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<JwtConfig>,
    pub accounts: Arc<dyn AccountStore>,
    pub admins: Arc<AdminEmails>,
}

impl AuthState {
    pub fn new(jwt: JwtConfig, accounts: Arc<dyn AccountStore>, admins: AdminEmails) -> Self {
        Self {
            jwt: Arc::new(jwt),
            accounts,
            admins: Arc::new(admins),
        }
    }

    pub fn from_config(cfg: &AppConfig, accounts: Arc<dyn AccountStore>) -> Self {
        Self::new(
            cfg.jwt.clone(),
            accounts,
            AdminEmails::new(&cfg.admin_emails),
        )
    }

    /// Non-terminal admin check: `false` for anonymous requests, unknown
    /// accounts, and accounts without an allow-listed e-mail.
    pub async fn is_admin(&self, user: Option<&CurrentUser>) -> anyhow::Result<bool> {
        let Some(user) = user else {
            return Ok(false);
        };

        let account = self.accounts.find_account(&user.subject).await?;
        Ok(account
            .and_then(|a| a.email)
            .is_some_and(|email| self.admins.contains(&email)))
    }
}

fn current_subject(request: &Request) -> Option<String> {
    request
        .extensions()
        .get::<CurrentUser>()
        .map(|u| u.subject.clone())
}

/// Attaches [`CurrentUser`] when the bearer token verifies.
///
/// Missing, malformed, badly signed, and expired credentials all leave the
/// request anonymous.
pub async fn authenticate(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_credential(request.headers(), &state.jwt.secret) {
        Credential::Valid(user) => {
            request.extensions_mut().insert(user);
        }
        Credential::Invalid(reason) => {
            debug!(%reason, "ignoring bearer credential");
            request.extensions_mut().remove::<CurrentUser>();
        }
        Credential::Missing => {
            request.extensions_mut().remove::<CurrentUser>();
        }
    }

    next.run(request).await
}

/// Rejects anonymous requests with 401.
pub async fn require_auth(request: Request, next: Next) -> Result<Response, ApiError> {
    if request.extensions().get::<CurrentUser>().is_none() {
        debug!(path = %request.uri().path(), "anonymous request rejected");
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Requires an existing account with a verified e-mail.
pub async fn require_verified(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let subject = current_subject(&request).ok_or(ApiError::Unauthorized)?;

    let verified = state
        .accounts
        .find_verification(&subject)
        .await
        .map_err(|e| ApiError::Internal(e.context("verification lookup failed")))?;

    if verified != Some(true) {
        warn!(%subject, found = verified.is_some(), "email verification required");
        return Err(ApiError::EmailVerificationRequired);
    }

    Ok(next.run(request).await)
}

/// Require an account whose e-mail is on the admin allow-list.
pub async fn require_admin(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .ok_or(ApiError::Unauthorized)?;

    let is_admin = state
        .is_admin(Some(&user))
        .await
        .map_err(|e| ApiError::Internal(e.context("admin lookup failed")))?;

    if !is_admin {
        warn!(subject = %user.subject, "admin access denied");
        return Err(ApiError::AdminOnly);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header::AUTHORIZATION, StatusCode},
        middleware::{from_fn, from_fn_with_state},
        routing::get,
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{
        account::{memory::InMemoryAccountStore, Account},
        auth::jwt::create_subject_jwt,
    };

    const SECRET: &str = "unit-test-secret";

    struct UnreachableStore;

    #[async_trait]
    impl AccountStore for UnreachableStore {
        async fn find_account(&self, _id: &str) -> anyhow::Result<Option<Account>> {
            anyhow::bail!("connection refused")
        }
    }

    fn state_with(store: impl AccountStore + 'static) -> AuthState {
        AuthState::new(
            JwtConfig::new(SECRET),
            Arc::new(store),
            AdminEmails::new(["boss@varsity.io"]),
        )
    }

    fn default_state() -> AuthState {
        state_with(InMemoryAccountStore::with_accounts([
            Account::new("u1").verified(true),
            Account::new("u2"),
            Account::new("boss").verified(true).with_email("Boss@Varsity.io"),
        ]))
    }

    async fn whoami(request: Request) -> String {
        request
            .extensions()
            .get::<CurrentUser>()
            .map(|u| u.subject.clone())
            .unwrap_or_else(|| "anonymous".into())
    }

    /// `authenticate` only.
    fn open_app(state: AuthState) -> Router {
        Router::new()
            .route("/", get(whoami))
            .layer(from_fn_with_state(state.clone(), authenticate))
            .with_state(state)
    }

    /// `authenticate`, `require_auth` and `require_verified`.
    fn verified_app(state: AuthState) -> Router {
        Router::new()
            .route("/", get(whoami))
            .route_layer(from_fn_with_state(state.clone(), require_verified))
            .route_layer(from_fn(require_auth))
            .layer(from_fn_with_state(state.clone(), authenticate))
            .with_state(state)
    }

    fn admin_app(state: AuthState) -> Router {
        Router::new()
            .route("/", get(whoami))
            .route_layer(from_fn_with_state(state.clone(), require_admin))
            .layer(from_fn_with_state(state.clone(), authenticate))
            .with_state(state)
    }

    fn bearer(subject: &str) -> String {
        let token = create_subject_jwt(subject, &JwtConfig::new(SECRET)).unwrap();
        format!("Bearer {token}")
    }

    async fn call(app: Router, auth: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        let res = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, bytes)
    }

    fn json_body(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn authenticate_attaches_identity_for_valid_token() {
        let (status, body) = call(open_app(default_state()), Some(&bearer("u1"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"u1");
    }

    #[tokio::test]
    async fn authenticate_passes_anonymous_requests_through() {
        let (status, body) = call(open_app(default_state()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"anonymous");

        let (status, body) = call(open_app(default_state()), Some("Bearer garbage")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"anonymous");
    }

    #[tokio::test]
    async fn missing_header_is_rejected_with_401() {
        let (status, body) = call(verified_app(default_state()), None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(&body), json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn wrongly_signed_token_behaves_like_no_header() {
        let forged = create_subject_jwt("u1", &JwtConfig::new("attacker-secret")).unwrap();
        let (status, body) =
            call(verified_app(default_state()), Some(&format!("Bearer {forged}"))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(&body), json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn verified_account_reaches_handler() {
        let (status, body) = call(verified_app(default_state()), Some(&bearer("u1"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"u1");
    }

    #[tokio::test]
    async fn unverified_account_is_forbidden() {
        let (status, body) = call(verified_app(default_state()), Some(&bearer("u2"))).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            json_body(&body),
            json!({ "error": "Email verification required" })
        );
    }

    #[tokio::test]
    async fn unknown_account_is_forbidden() {
        let (status, body) = call(verified_app(default_state()), Some(&bearer("ghost"))).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            json_body(&body),
            json!({ "error": "Email verification required" })
        );
    }

    #[tokio::test]
    async fn require_verified_without_identity_is_401() {
        let state = default_state();
        let app = Router::new()
            .route("/", get(whoami))
            .route_layer(from_fn_with_state(state.clone(), require_verified))
            .with_state(state);

        let (status, body) = call(app, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(&body), json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn store_failure_fails_closed() {
        let (status, body) =
            call(verified_app(state_with(UnreachableStore)), Some(&bearer("u1"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(&body), json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn admin_store_failure_fails_closed() {
        let (status, body) =
            call(admin_app(state_with(UnreachableStore)), Some(&bearer("boss"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(&body), json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn admin_gate() {
        let (status, _) = call(admin_app(default_state()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = call(admin_app(default_state()), Some(&bearer("u1"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json_body(&body), json!({ "error": "Admin only" }));

        let (status, body) = call(admin_app(default_state()), Some(&bearer("boss"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"boss");
    }

    #[tokio::test]
    async fn is_admin_is_non_terminal() {
        let state = default_state();

        assert!(!state.is_admin(None).await.unwrap());
        assert!(!state.is_admin(Some(&CurrentUser::new("u1"))).await.unwrap());
        assert!(!state.is_admin(Some(&CurrentUser::new("ghost"))).await.unwrap());
        assert!(state.is_admin(Some(&CurrentUser::new("boss"))).await.unwrap());
    }
}
