use axum::Json;
use serde_json::{json, Value};

/// Liveness check. No auth, no store access.
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
