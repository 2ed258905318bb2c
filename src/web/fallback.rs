use crate::error::api::ApiError;

/// Router fallback: JSON `404 {"error": "Not found"}`.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
