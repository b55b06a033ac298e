//! `GET /health` handler.

use axum::Json;
use serde_json::{Value, json};

/// Liveness probe. Touches no upstream.
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
