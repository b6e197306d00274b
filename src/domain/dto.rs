//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{CharacterMap, GenerationSeed, KeyFormatSnapshot};
use crate::error::KeyError;

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (0 = success, non-zero = error).
    pub code: i32,

    /// Human-readable message.
    pub message: String,

    /// Response data (null on error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a success response.
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

/// Request to generate a chain of keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    /// Optional prefix prepended to every key.
    #[serde(default)]
    pub prefix: Option<String>,

    /// Seed token returned by a previous call; absent starts a new chain.
    #[serde(default)]
    pub seed: Option<String>,

    /// Number of keys to generate (default: 1).
    #[serde(default = "default_count")]
    pub count: u32,
}

const fn default_count() -> u32 {
    1
}

impl GenerateRequest {
    /// Parse the seed token, if one was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidArgument`] for a malformed token.
    pub fn parsed_seed(&self) -> Result<Option<GenerationSeed>, KeyError> {
        self.seed.as_deref().map(str::parse::<GenerationSeed>).transpose()
    }
}

/// Response for key generation: the keys in chain order plus the seed that
/// continues the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBatchResponse {
    /// Generated keys.
    pub keys: Vec<String>,

    /// Seed for the next request.
    pub seed: GenerationSeed,

    /// When the batch was generated (RFC 3339).
    pub generated_at: String,
}

/// Response describing the active key format.
pub type FormatResponse = KeyFormatSnapshot;

/// Request to install a new character map.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceMapRequest {
    /// Ordered `[from, to]` pairs.
    pub mappings: CharacterMap,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,

    /// Service version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success(vec![1, 2, 3]);
        assert_eq!(response.code, 0);
        assert_eq!(response.message, "success");
        assert_eq!(response.data, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_generate_request_defaults() {
        let req: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.count, 1);
        assert!(req.prefix.is_none());
        assert!(req.seed.is_none());
    }

    #[test]
    fn test_generate_request_seed() {
        let req = GenerateRequest::default();
        assert_eq!(req.parsed_seed().unwrap(), None);

        let req = GenerateRequest {
            seed: Some("not-a-seed".to_string()),
            ..Default::default()
        };
        assert!(req.parsed_seed().is_err());
    }

    #[test]
    fn test_replace_map_request() {
        let req: ReplaceMapRequest =
            serde_json::from_str(r#"{"mappings":[["0","1"],["1","0"]]}"#).unwrap();
        assert_eq!(req.mappings.mappings(), &[('0', '1'), ('1', '0')]);
    }
}
