//! Key generation handlers.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::state::AppState;
use crate::domain::{
    ApiResponse, FormatResponse, GenerateRequest, KeyBatchResponse, ReplaceMapRequest,
};
use crate::error::Result;

/// Generate a chain of activation keys.
///
/// # Errors
///
/// Returns an error if the count, prefix, or seed token is invalid.
pub async fn generate(
    State(state): State<AppState>,
    Query(query): Query<GenerateRequest>,
) -> Result<Json<ApiResponse<KeyBatchResponse>>> {
    let seed = query.parsed_seed()?;

    let batch = state
        .key_service
        .generate(query.prefix.as_deref(), seed, query.count)?;

    Ok(Json(ApiResponse::success(KeyBatchResponse {
        keys: batch.keys,
        seed: batch.seed,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })))
}

/// Describe the active key format.
pub async fn get_format(State(state): State<AppState>) -> Json<ApiResponse<FormatResponse>> {
    Json(ApiResponse::success(state.key_service.format()))
}

/// Replace the digit to digit map.
///
/// # Errors
///
/// Returns an error if the map is not a complete digit to digit map.
pub async fn replace_digit_to_digit(
    State(state): State<AppState>,
    Json(request): Json<ReplaceMapRequest>,
) -> Result<Json<ApiResponse<FormatResponse>>> {
    let format = state
        .key_service
        .replace_digit_to_digit_map(request.mappings)?;
    Ok(Json(ApiResponse::success(format)))
}

/// Replace the digit to letter map.
///
/// # Errors
///
/// Returns an error if the map is not a complete digit to letter map.
pub async fn replace_digit_to_letter(
    State(state): State<AppState>,
    Json(request): Json<ReplaceMapRequest>,
) -> Result<Json<ApiResponse<FormatResponse>>> {
    let format = state
        .key_service
        .replace_digit_to_letter_map(request.mappings)?;
    Ok(Json(ApiResponse::success(format)))
}
