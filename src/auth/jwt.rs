//! # Access token creation and decoding (JWT)
//!
//! Pure functions: nothing here reads the environment or global state.
//! The HMAC secret is supplied by the caller, typically from
//! [`JwtConfig`](crate::config::jwt::JwtConfig).
//!
//! Tokens are HS256. The claims mapping is caller-defined; issuance adds
//! `iat` and `exp`. Verification checks the signature and, when present,
//! `exp` with no clock leeway: a token is rejected as soon as `exp` passes.
//! Tokens without `exp` are accepted because older clients still hold
//! tokens issued without one.
//!
//! ## Provided functions
//! - [`create_jwt`] — sign an arbitrary claims mapping
//! - [`create_subject_jwt`] — sign `{ "id": subject }`
//! - [`decode_jwt`] — verify and decode
//! - [`subject_of`] — pick the subject identifier out of decoded claims

use anyhow::anyhow;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{json, Map, Value};

use crate::config::jwt::{JwtConfig, DEFAULT_JWT_EXPIRES_DAYS};

/// Decoded token payload.
pub type Claims = Map<String, Value>;

/// Claim names that may carry the subject identifier, in priority order.
pub const SUBJECT_CLAIMS: [&str; 2] = ["id", "sub"];

/// Signs `claims` with `secret`.
///
/// `expires_in` defaults to seven days. Any `iat` / `exp` already present in
/// `claims` is replaced by the issued values.
///
/// ## Errors
/// - the expiry overflows the representable time range
/// - JWT encoding fails
///
/// ## Example
/// ```
/// use serde_json::{json, Map};
/// use varsityhub_api::auth::jwt::{create_jwt, decode_jwt};
///
/// let mut claims = Map::new();
/// claims.insert("id".into(), json!("u1"));
///
/// let token = create_jwt(&claims, "test-secret", None).unwrap();
/// let decoded = decode_jwt(&token, "test-secret").unwrap();
/// assert_eq!(decoded["id"], "u1");
/// ```
pub fn create_jwt(
    claims: &Claims,
    secret: &str,
    expires_in: Option<Duration>,
) -> anyhow::Result<String> {
    let now = Utc::now();
    let ttl = expires_in.unwrap_or_else(|| Duration::days(DEFAULT_JWT_EXPIRES_DAYS as i64));
    let expiration = now
        .checked_add_signed(ttl)
        .ok_or_else(|| anyhow!("token expiry out of range"))?;

    let mut payload = claims.clone();
    payload.insert("iat".into(), json!(now.timestamp()));
    payload.insert("exp".into(), json!(expiration.timestamp()));

    let token = encode(
        &Header::new(Algorithm::HS256),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Signs `{ "id": subject }` with the configured secret and lifetime.
pub fn create_subject_jwt(subject: &str, cfg: &JwtConfig) -> anyhow::Result<String> {
    let mut claims = Claims::new();
    claims.insert("id".into(), json!(subject));
    create_jwt(&claims, &cfg.secret, Some(cfg.expires_in))
}

/// Verifies `token` against `secret` and returns its claims.
///
/// ## Errors
/// - malformed token
/// - signature mismatch
/// - expired token
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_aud = false;
    validation.leeway = 0;

    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    Ok(decoded.claims)
}

/// Returns the first non-blank string among [`SUBJECT_CLAIMS`].
pub fn subject_of(claims: &Claims) -> Option<&str> {
    SUBJECT_CLAIMS
        .iter()
        .filter_map(|name| claims.get(*name).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
}
