use axum::Json;
use serde_json::{json, Value};

/// GET /api/health - liveness probe
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "gagambi-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "build_time": env!("BUILD_TIME"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
