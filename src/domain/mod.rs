//! Domain models for key generation.
//!
//! This module contains the key format types, the chain seed, the generated
//! key value, and API contracts.

pub mod character_map;
pub mod dto;
pub mod key;
pub mod properties;
pub mod seed;

pub use character_map::CharacterMap;
pub use dto::{
    ApiResponse, FormatResponse, GenerateRequest, KeyBatchResponse, ReplaceMapRequest,
};
pub use key::GeneratedKey;
pub use properties::{
    KeyFormatProperties, KeyFormatSnapshot, MAX_COMPONENT_COUNT, MAX_COMPONENT_LENGTH,
    MAX_PREFIX_LENGTH, MIN_COMPONENT_COUNT, MIN_COMPONENT_LENGTH, MIN_PREFIX_LENGTH,
};
pub use seed::GenerationSeed;
