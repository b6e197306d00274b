//! Health check handlers.

use axum::{Json, extract::State, http::Uri};
use serde_json::{Value, json};

use crate::api::state::AppState;
use crate::domain::ApiResponse;
use crate::domain::dto::HealthResponse;
use crate::error::AppError;

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Readiness probe - the key format is validated at startup, so a running
/// service is always ready. Reports the active key length.
pub async fn ready(State(state): State<AppState>) -> Json<Value> {
    let format = state.key_service.format();

    Json(json!({
        "code": 0,
        "message": "success",
        "data": {
            "ready": true,
            "key_length": format.key_length
        }
    }))
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<AppState>) -> String {
    let mut output = String::new();

    output.push_str("# HELP keygen_up Whether the service is up\n");
    output.push_str("# TYPE keygen_up gauge\n");
    output.push_str("keygen_up 1\n");

    if let Some(handle) = &state.metrics {
        output.push_str(&handle.render());
    }

    output
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {uri}"))
}
