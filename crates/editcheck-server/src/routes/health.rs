//! Health check endpoint

use axum::response::Json;
use serde_json::{json, Value};

/// Liveness probe. Always succeeds while the process is serving.
pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
