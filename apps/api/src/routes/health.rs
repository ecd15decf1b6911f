use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::matching::engine::ALGORITHM_VERSION;

/// GET /health
/// Returns a simple status object with service and scoring-logic versions.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "matcher-api",
        "algorithm_version": ALGORITHM_VERSION,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
