//! Bearer credential extraction and verification.
//!
//! [`resolve_credential`] never fails: every outcome is a [`Credential`]
//! variant. The middleware collapses `Missing` and `Invalid` into
//! "anonymous", but callers and tests can still tell them apart.

use std::fmt;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::errors::ErrorKind;

use crate::auth::{
    jwt::{decode_jwt, subject_of},
    principal::CurrentUser,
};

/// Literal, case-sensitive scheme prefix.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Why a supplied credential was not accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidReason {
    Malformed,
    BadSignature,
    Expired,
    MissingSubject,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvalidReason::Malformed => "malformed token",
            InvalidReason::BadSignature => "bad signature",
            InvalidReason::Expired => "expired token",
            InvalidReason::MissingSubject => "no subject claim",
        })
    }
}

impl From<&ErrorKind> for InvalidReason {
    fn from(kind: &ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidSignature => InvalidReason::BadSignature,
            ErrorKind::ExpiredSignature => InvalidReason::Expired,
            _ => InvalidReason::Malformed,
        }
    }
}

/// Outcome of inspecting a request's `Authorization` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
    /// No header, or not a `Bearer` scheme.
    Missing,
    /// A bearer token was present but did not verify.
    Invalid(InvalidReason),
    /// Verified token naming a subject.
    Valid(CurrentUser),
}

impl Credential {
    pub fn into_user(self) -> Option<CurrentUser> {
        match self {
            Credential::Valid(user) => Some(user),
            Credential::Missing | Credential::Invalid(_) => None,
        }
    }
}

/// Returns the trimmed bearer token, if any.
///
/// Non-UTF-8 header values and other schemes count as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
}

/// Verifies the request's bearer credential against `secret`.
pub fn resolve_credential(headers: &HeaderMap, secret: &str) -> Credential {
    let Some(token) = bearer_token(headers) else {
        return Credential::Missing;
    };

    match decode_jwt(token, secret) {
        Ok(claims) => match subject_of(&claims) {
            Some(subject) => Credential::Valid(CurrentUser::new(subject)),
            None => Credential::Invalid(InvalidReason::MissingSubject),
        },
        Err(e) => Credential::Invalid(InvalidReason::from(e.kind())),
    }
}
