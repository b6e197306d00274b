//! Activation key generator.
//!
//! Generation is a pure function of the format, the incoming seed and the
//! optional prefix. The generator keeps no counter of its own; callers thread
//! the returned [`GenerationSeed`] into the next call to extend a chain.

use std::sync::Arc;

use crate::domain::{GeneratedKey, GenerationSeed, KeyFormatProperties};
use crate::error::{KeyError, KeyResult};
use crate::service::digits;

/// Stateless key generator bound to a key format.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    properties: Arc<KeyFormatProperties>,
}

impl KeyGenerator {
    /// Create a generator for `properties`.
    #[must_use]
    pub const fn new(properties: Arc<KeyFormatProperties>) -> Self {
        Self { properties }
    }

    /// The key format in use.
    #[must_use]
    pub const fn properties(&self) -> &Arc<KeyFormatProperties> {
        &self.properties
    }

    /// Generate an unprefixed key.
    ///
    /// `previous` is the seed returned by the previous call of the chain, or
    /// `None` to start a new chain from a random point. The same seed and
    /// format always produce the same key.
    #[must_use]
    pub fn generate(&self, previous: Option<GenerationSeed>) -> GeneratedKey {
        let working = previous.unwrap_or_else(random_seed);
        let value = self.render(working);
        GeneratedKey::new(value, working.successor())
    }

    /// Generate a key of the form `prefix + separator + key`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidArgument`] if `prefix` is empty or
    /// whitespace only.
    pub fn generate_with_prefix(
        &self,
        prefix: &str,
        previous: Option<GenerationSeed>,
    ) -> KeyResult<GeneratedKey> {
        validate_prefix(prefix)?;
        let (body, seed) = self.generate(previous).into_parts();
        let value = format!("{prefix}{}{body}", self.properties.separator());
        Ok(GeneratedKey::new(value, seed))
    }

    /// Endless chain of unprefixed keys starting at `start`.
    #[must_use]
    pub const fn chain(&self, start: Option<GenerationSeed>) -> KeyChain<'_> {
        KeyChain {
            generator: self,
            prefix: None,
            seed: start,
        }
    }

    /// Endless chain of prefixed keys starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidArgument`] if `prefix` is empty or
    /// whitespace only.
    pub fn chain_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
        start: Option<GenerationSeed>,
    ) -> KeyResult<KeyChain<'a>> {
        validate_prefix(prefix)?;
        Ok(KeyChain {
            generator: self,
            prefix: Some(prefix),
            seed: start,
        })
    }

    fn render(&self, working: GenerationSeed) -> String {
        let props = &self.properties;
        // Each map is read once per key. The two maps are locked
        // separately, so a key rendered during back-to-back replacements
        // may pair the old map of one kind with the new map of the other.
        let digit_map = props.digit_to_digit_map();
        let letter_map = props.digit_to_letter_map();

        let mut value = String::with_capacity(props.key_length());
        for (i, position) in digits::expand(working.raw(), props.digit_count())
            .into_iter()
            .enumerate()
        {
            if i > 0 && i % props.component_length() == 0 {
                value.push(props.separator());
            }
            let raw = char::from(b'0' + position.digit);
            let map = if position.letter {
                &letter_map
            } else {
                &digit_map
            };
            // Installed maps always cover '0'..='9'.
            value.push(map.get(raw).unwrap_or(raw));
        }
        value
    }
}

impl Default for KeyGenerator {
    /// Generator for [`KeyFormatProperties::default`].
    fn default() -> Self {
        Self::new(Arc::new(KeyFormatProperties::default()))
    }
}

/// Iterator over a chain of keys; see [`KeyGenerator::chain`].
#[derive(Debug, Clone)]
pub struct KeyChain<'a> {
    generator: &'a KeyGenerator,
    prefix: Option<&'a str>,
    seed: Option<GenerationSeed>,
}

impl KeyChain<'_> {
    /// Seed the next key will be generated from; `None` before the first
    /// key of a chain started without one.
    #[must_use]
    pub const fn seed(&self) -> Option<GenerationSeed> {
        self.seed
    }
}

impl Iterator for KeyChain<'_> {
    type Item = GeneratedKey;

    fn next(&mut self) -> Option<GeneratedKey> {
        let key = self.generator.generate(self.seed);
        self.seed = Some(key.seed());

        let key = match self.prefix {
            Some(prefix) => {
                let (body, seed) = key.into_parts();
                let separator = self.generator.properties.separator();
                GeneratedKey::new(format!("{prefix}{separator}{body}"), seed)
            }
            None => key,
        };
        Some(key)
    }
}

fn random_seed() -> GenerationSeed {
    GenerationSeed::from_raw(rand::random())
}

fn validate_prefix(prefix: &str) -> KeyResult<()> {
    if prefix.trim().is_empty() {
        return Err(KeyError::invalid(
            "prefix",
            "must not be empty or whitespace only",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::CharacterMap;

    fn generator(separator: char, length: usize, count: usize, prefix: usize) -> KeyGenerator {
        KeyGenerator::new(Arc::new(
            KeyFormatProperties::new(separator, length, count, prefix).unwrap(),
        ))
    }

    #[test]
    fn test_default_generator_shape() {
        let keygen = KeyGenerator::default();
        let key = keygen.generate(None);
        assert_eq!(key.value().len(), 19);
        let parts: Vec<&str> = key.value().split('-').collect();
        assert_eq!(parts.len(), 4);
        for part in parts {
            assert_eq!(part.len(), 4);
            assert!(part.chars().all(|c| c.is_ascii_digit() || ('A'..='J').contains(&c)));
        }
    }

    #[test]
    fn test_plus_separated_key() {
        let keygen = generator('+', 3, 3, 0);
        let key = keygen.generate(None);
        assert_eq!(key.value().len(), 11);
        assert_eq!(key.value().matches('+').count(), 2);
    }

    #[test]
    fn test_prefixed_key() {
        let keygen = generator('-', 4, 4, 3);
        let key = keygen.generate_with_prefix("ABC", None).unwrap();
        assert!(key.value().starts_with("ABC-"));
        assert_eq!(key.value().len(), 23);
    }

    #[test]
    fn test_prefix_length_is_not_enforced() {
        let keygen = generator('-', 4, 4, 3);
        let key = keygen.generate_with_prefix("LONGPREFIX", None).unwrap();
        assert_eq!(key.value().len(), 10 + 1 + 19);
    }

    #[test]
    fn test_blank_prefix_rejected() {
        let keygen = KeyGenerator::default();
        for prefix in ["", " ", "\t\n"] {
            let err = keygen.generate_with_prefix(prefix, None).unwrap_err();
            assert!(matches!(err, KeyError::InvalidArgument { name: "prefix", .. }));
        }
        assert!(keygen.chain_with_prefix("  ", None).is_err());
    }

    #[test]
    fn test_lengths_for_all_formats() {
        let seed = GenerationSeed::from_raw(12_345);
        for length in 2..=10 {
            for count in 2..=10 {
                let keygen = generator('.', length, count, 0);
                let key = keygen.generate(Some(seed));
                assert_eq!(key.value().chars().count(), count * length + count - 1);

                let key = keygen.generate_with_prefix("PRE", Some(seed)).unwrap();
                assert_eq!(
                    key.value().chars().count(),
                    3 + 1 + count * length + count - 1
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_key() {
        let keygen = KeyGenerator::default();
        let seed = GenerationSeed::from_raw(987_654_321);
        assert_eq!(keygen.generate(Some(seed)), keygen.generate(Some(seed)));
        assert_eq!(
            keygen.generate_with_prefix("X", Some(seed)).unwrap().value(),
            format!("X-{}", keygen.generate(Some(seed)).value())
        );
    }

    #[test]
    fn test_returned_seed_advances() {
        let keygen = KeyGenerator::default();
        let seed = GenerationSeed::from_raw(5);
        let key = keygen.generate(Some(seed));
        assert_ne!(key.seed(), seed);
        assert_eq!(key.seed(), seed.successor());

        let prefixed = keygen.generate_with_prefix("ABCD", Some(seed)).unwrap();
        assert_eq!(prefixed.seed(), key.seed());
    }

    #[test]
    fn test_adjacent_keys_differ() {
        let keygen = generator('-', 2, 2, 0);
        let first = keygen.generate(Some(GenerationSeed::from_raw(u64::MAX - 500)));
        let mut previous = first.value().to_string();
        let mut seed = Some(first.seed());
        for _ in 0..1000 {
            let key = keygen.generate(seed);
            assert_ne!(key.value(), previous);
            previous = key.value().to_string();
            seed = Some(key.seed());
        }
    }

    #[test]
    fn test_adjacent_keys_differ_with_degenerate_maps() {
        let props = KeyFormatProperties::new('-', 2, 2, 0)
            .unwrap()
            .with_maps(
                CharacterMap::from_targets("0000000000").unwrap(),
                CharacterMap::from_targets("AAAAAAAAAA").unwrap(),
            )
            .unwrap();
        let keygen = KeyGenerator::new(Arc::new(props));

        let keys: Vec<String> = keygen
            .chain(Some(GenerationSeed::from_raw(0)))
            .take(64)
            .map(|k| k.value().to_string())
            .collect();
        for pair in keys.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        // Only the class pattern varies: 16 distinct keys of 4 positions.
        let distinct: HashSet<&String> = keys.iter().collect();
        assert_eq!(distinct.len(), 16);
    }

    #[test]
    fn test_chain_matches_manual_threading() {
        let keygen = KeyGenerator::default();
        let start = GenerationSeed::from_raw(77);

        let chained: Vec<GeneratedKey> = keygen.chain(Some(start)).take(5).collect();

        let mut manual = Vec::new();
        let mut seed = Some(start);
        for _ in 0..5 {
            let key = keygen.generate(seed);
            seed = Some(key.seed());
            manual.push(key);
        }
        assert_eq!(chained, manual);
    }

    #[test]
    fn test_prefixed_chain() {
        let keygen = KeyGenerator::default();
        let mut chain = keygen
            .chain_with_prefix("LIC", Some(GenerationSeed::from_raw(1)))
            .unwrap();
        let first = chain.next().unwrap();
        let second = chain.next().unwrap();
        assert!(first.value().starts_with("LIC-"));
        assert!(second.value().starts_with("LIC-"));
        assert_ne!(first.value(), second.value());
        assert_eq!(chain.seed(), Some(second.seed()));
    }

    #[test]
    fn test_maps_drive_output() {
        let props = KeyFormatProperties::new('-', 5, 4, 0)
            .unwrap()
            .with_maps(
                CharacterMap::from_targets("7777777777").unwrap(),
                CharacterMap::from_targets("ZZZZZZZZZZ").unwrap(),
            )
            .unwrap();
        let keygen = KeyGenerator::new(Arc::new(props));
        let key = keygen.generate(None);
        assert!(key.value().chars().all(|c| matches!(c, '7' | 'Z' | '-')));
    }

    #[test]
    fn test_map_replacement_is_observed() {
        let props = Arc::new(KeyFormatProperties::default());
        let keygen = KeyGenerator::new(Arc::clone(&props));
        let seed = Some(GenerationSeed::from_raw(3));
        let before = keygen.generate(seed);

        props
            .replace_digit_to_letter_map(CharacterMap::from_targets("QQQQQQQQQQ").unwrap())
            .unwrap();
        let after = keygen.generate(seed);

        assert!(after.value().chars().all(|c| c.is_ascii_digit() || c == 'Q' || c == '-'));
        assert_eq!(before.seed(), after.seed());
    }

    #[test]
    fn test_parallel_chains() {
        let keygen = KeyGenerator::default();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4_u64)
                .map(|t| {
                    let keygen = &keygen;
                    scope.spawn(move || {
                        keygen
                            .chain(Some(GenerationSeed::from_raw(t * 1_000_000)))
                            .take(200)
                            .map(|k| k.value().len())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                let lengths = handle.join().unwrap();
                assert!(lengths.iter().all(|len| *len == 19));
            }
        });
    }
}
