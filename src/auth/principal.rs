use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::api::ApiError;

/// Identity attached to a request after its bearer token verified.
///
/// Carries the subject identifier only. Everything else about the user
/// (verification, role, plan) lives in the account store and is looked up
/// by the stage that needs it.
///
/// Present on a request if and only if a `Bearer` credential was supplied,
/// its signature and expiry checked out, and it named a subject. Its absence
/// is not an error by itself; only `require_auth` treats it as one.
///
/// ```rust
/// use varsityhub_api::auth::CurrentUser;
///
/// let user = CurrentUser::new("u1");
/// assert_eq!(user.subject, "u1");
/// ```
///
/// Handlers behind `require_auth` can extract it directly:
///
/// ```ignore
/// async fn me(user: CurrentUser) -> String {
///     user.subject
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub subject: String,
}

impl CurrentUser {
    /// No validation; the subject is opaque at this layer.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}
