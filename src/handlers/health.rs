use axum::response::Json;
use serde_json::{json, Value};

use hubspot_connector::utils::logging::*;

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": "hubspot-connector",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
