//! HTTP handlers.

pub mod companies;
pub mod licenses;
pub mod sync;

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
