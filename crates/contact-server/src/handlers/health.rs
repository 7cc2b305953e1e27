//! Health check handler

use crate::now_iso;
use axum::Json;
use contact_types::HealthResponse;

pub const HEALTH_MESSAGE: &str = "Contact API is running";

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: HEALTH_MESSAGE.to_string(),
        timestamp: now_iso(),
    })
}
