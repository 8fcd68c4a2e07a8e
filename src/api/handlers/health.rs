use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::services::DeviceService;

pub async fn health_check(State(service): State<DeviceService>) -> (StatusCode, Json<Value>) {
    let mut response = json!({
        "status": "ok",
        "database": {
            "connected": false,
            "table_exists": false,
        }
    });

    match service.health_check().await {
        Ok((connected, table_exists)) => {
            response["database"]["connected"] = json!(connected);
            response["database"]["table_exists"] = json!(table_exists);

            if !table_exists {
                response["database"]["error"] =
                    json!("Devices table does not exist. Please run migrations.");
            }
        }
        Err(e) => {
            tracing::error!("Health check failed: {:?}", e);
            response["database"]["error"] = json!("Database unavailable");
        }
    }

    let healthy = response["database"]["connected"].as_bool().unwrap_or(false)
        && response["database"]["table_exists"].as_bool().unwrap_or(false);

    if healthy {
        (StatusCode::OK, Json(response))
    } else {
        response["status"] = json!("unavailable");
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
