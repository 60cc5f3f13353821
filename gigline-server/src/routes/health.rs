//! Health route, also the landing target for flash redirects

use axum::Json;
use serde_json::{json, Value};

/// GET / and GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "gigline-server",
    }))
}
