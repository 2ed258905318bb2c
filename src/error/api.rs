use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Terminal failures produced by the request pipeline.
///
/// Every variant renders as `{"error": "<message>"}` with the matching
/// status code. The message of [`ApiError::Internal`] is fixed so store or
/// driver details never reach the client; the source is logged instead.
///
/// ```
/// use axum::{http::StatusCode, response::IntoResponse};
/// use varsityhub_api::error::api::ApiError;
///
/// let res = ApiError::EmailVerificationRequired.into_response();
/// assert_eq!(res.status(), StatusCode::FORBIDDEN);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Email verification required")]
    EmailVerificationRequired,

    #[error("Admin only")]
    AdminOnly,

    #[error("Not found")]
    NotFound,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::EmailVerificationRequired | ApiError::AdminOnly => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(source) = &self {
            tracing::error!(error = ?source, "request failed");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
