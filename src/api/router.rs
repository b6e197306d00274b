//! Router setup and configuration.

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, keys};
use crate::api::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let metrics_path = state.config.observability.metrics_path.clone();

    // Health and metrics routes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route(&metrics_path, get(health::metrics));

    // Key generation and format routes
    let key_routes = Router::new()
        .route("/generate", get(keys::generate))
        .route("/format", get(keys::get_format))
        .route("/format/digit-to-digit", put(keys::replace_digit_to_digit))
        .route("/format/digit-to-letter", put(keys::replace_digit_to_letter));

    Router::new()
        .merge(health_routes)
        .nest("/v1/keys", key_routes)
        .fallback(health::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
