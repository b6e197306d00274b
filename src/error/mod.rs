//! Error handling module.
//!
//! Two layers of errors live here:
//!
//! - [`KeyError`] is the domain taxonomy raised by character maps, key format
//!   properties, seeds, and the generator itself.
//! - [`AppError`] wraps it for the HTTP layer with status code mapping and the
//!   standardized `{code, message, data}` error body.

pub mod codes;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use codes::ErrorCode;

/// Errors raised while configuring or running key generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// An argument was rejected (whitespace separator, malformed character
    /// map, blank prefix, unparsable seed token).
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A numeric format parameter fell outside its bounds.
    #[error("Argument `{name}` out of range: {value} not in {min}..={max}")]
    OutOfRange {
        /// Name of the offending argument.
        name: &'static str,
        /// Supplied value.
        value: usize,
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
    },
}

impl KeyError {
    /// Build an [`KeyError::InvalidArgument`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type alias using `KeyError`.
pub type KeyResult<T> = std::result::Result<T, KeyError>;

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Key generation rejected its input.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidConfig(_) => ErrorCode::INVALID_CONFIG,
            Self::Key(KeyError::InvalidArgument { .. }) => ErrorCode::INVALID_PARAM,
            Self::Key(KeyError::OutOfRange { .. }) => ErrorCode::OUT_OF_RANGE,
            Self::BadRequest(_) => ErrorCode::BAD_REQUEST,
            Self::NotFound(_) => ErrorCode::NOT_FOUND,
            Self::Internal(_) => ErrorCode::INTERNAL_ERROR,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidConfig(_) | Self::Key(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().as_i32();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(
                error_code = code,
                status = %status,
                message = %message,
                "Request failed"
            );
        } else {
            tracing::debug!(
                error_code = code,
                status = %status,
                message = %message,
                "Request rejected"
            );
        }

        let body = Json(json!({
            "code": code,
            "message": message,
            "data": null
        }));

        (status, body).into_response()
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
