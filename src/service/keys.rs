//! Key service.
//!
//! Wraps a [`KeyGenerator`] for the API layer: batch generation along a
//! chain, format inspection, and runtime map replacement.

use std::sync::Arc;

use crate::config::GenerationConfig;
use crate::domain::{CharacterMap, GenerationSeed, KeyFormatProperties, KeyFormatSnapshot};
use crate::error::{AppError, Result};
use crate::service::generator::KeyGenerator;

/// Keys generated by one batch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBatch {
    /// Keys in chain order.
    pub keys: Vec<String>,
    /// Seed that continues the chain after the last key.
    pub seed: GenerationSeed,
}

/// Service for activation key generation.
pub struct KeyService {
    /// Generator bound to the shared key format.
    generator: KeyGenerator,
    /// Largest accepted batch.
    max_batch_size: u32,
}

impl KeyService {
    /// Create a new key service.
    #[must_use]
    pub const fn new(properties: Arc<KeyFormatProperties>, config: &GenerationConfig) -> Self {
        Self {
            generator: KeyGenerator::new(properties),
            max_batch_size: config.max_batch_size,
        }
    }

    /// Largest accepted batch.
    #[must_use]
    pub const fn max_batch_size(&self) -> u32 {
        self.max_batch_size
    }

    /// Generate `count` keys along one chain.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Optional prefix for every key
    /// * `seed` - Seed from a previous batch, or `None` to start a chain
    /// * `count` - Number of keys to generate
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is outside `1..=max_batch_size` or the
    /// prefix is blank.
    pub fn generate(
        &self,
        prefix: Option<&str>,
        seed: Option<GenerationSeed>,
        count: u32,
    ) -> Result<KeyBatch> {
        if count == 0 || count > self.max_batch_size {
            return Err(AppError::BadRequest(format!(
                "count must be between 1 and {}, got {count}",
                self.max_batch_size
            )));
        }

        let resumed = seed.is_some();
        let mut chain = match prefix {
            Some(prefix) => self.generator.chain_with_prefix(prefix, seed)?,
            None => self.generator.chain(seed),
        };

        let keys: Vec<String> = chain
            .by_ref()
            .take(count as usize)
            .map(|key| key.into_parts().0)
            .collect();
        let next_seed = chain
            .seed()
            .ok_or_else(|| AppError::Internal("chain produced no keys".to_string()))?;

        metrics::counter!("keygen_keys_generated_total").increment(u64::from(count));
        tracing::debug!(
            count,
            prefixed = prefix.is_some(),
            resumed,
            "Generated key batch"
        );

        Ok(KeyBatch {
            keys,
            seed: next_seed,
        })
    }

    /// Describe the active key format.
    #[must_use]
    pub fn format(&self) -> KeyFormatSnapshot {
        self.generator.properties().snapshot()
    }

    /// Install a new digit to digit map.
    ///
    /// # Errors
    ///
    /// Returns an error if the map is not a complete digit to digit map.
    pub fn replace_digit_to_digit_map(&self, map: CharacterMap) -> Result<KeyFormatSnapshot> {
        self.generator
            .properties()
            .replace_digit_to_digit_map(map)?;
        metrics::counter!("keygen_map_replacements_total", "map" => "digit_to_digit")
            .increment(1);
        Ok(self.format())
    }

    /// Install a new digit to letter map.
    ///
    /// # Errors
    ///
    /// Returns an error if the map is not a complete digit to letter map.
    pub fn replace_digit_to_letter_map(&self, map: CharacterMap) -> Result<KeyFormatSnapshot> {
        self.generator
            .properties()
            .replace_digit_to_letter_map(map)?;
        metrics::counter!("keygen_map_replacements_total", "map" => "digit_to_letter")
            .increment(1);
        Ok(self.format())
    }
}
