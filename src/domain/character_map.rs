//! Order-preserving character substitution table.
//!
//! A [`CharacterMap`] places no constraint on which characters it maps; the
//! alphabet rules for digit maps are enforced by
//! [`KeyFormatProperties`](crate::domain::KeyFormatProperties).

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{KeyError, KeyResult};

/// Immutable mapping from one character to another.
///
/// Entries keep the order they were supplied in; equality compares that
/// order too.
#[derive(Debug, Clone)]
pub struct CharacterMap {
    /// Entries in insertion order.
    entries: Vec<(char, char)>,
    /// Direct lookup by source character.
    lookup: HashMap<char, char>,
}

impl CharacterMap {
    /// Build a map from `(from, to)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidArgument`] if a source character appears
    /// more than once.
    pub fn new(pairs: impl IntoIterator<Item = (char, char)>) -> KeyResult<Self> {
        let mut entries = Vec::new();
        let mut lookup = HashMap::new();

        for (from, to) in pairs {
            if lookup.insert(from, to).is_some() {
                return Err(KeyError::invalid(
                    "map",
                    format!("duplicate source character '{from}'"),
                ));
            }
            entries.push((from, to));
        }

        Ok(Self { entries, lookup })
    }

    /// Build a digit-keyed map where the i-th character of `targets` is the
    /// image of digit `i`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidArgument`] unless `targets` has exactly ten
    /// characters.
    pub fn from_targets(targets: &str) -> KeyResult<Self> {
        let count = targets.chars().count();
        if count != 10 {
            return Err(KeyError::invalid(
                "map",
                format!("expected 10 target characters, got {count}"),
            ));
        }
        Self::new(('0'..='9').zip(targets.chars()))
    }

    /// Digit-keyed map with `image(d)` as the image of digit `d`.
    pub(crate) fn from_digit_image(image: impl Fn(u8) -> char) -> Self {
        let entries: Vec<(char, char)> = (0..10u8)
            .map(|d| (char::from(b'0' + d), image(d)))
            .collect();
        let lookup = entries.iter().copied().collect();
        Self { entries, lookup }
    }

    /// Entries as an ordered slice of `(from, to)` pairs.
    #[must_use]
    pub fn mappings(&self) -> &[(char, char)] {
        &self.entries
    }

    /// Entries as a lookup table.
    #[must_use]
    pub const fn lookup(&self) -> &HashMap<char, char> {
        &self.lookup
    }

    /// Look up the image of `from`.
    #[must_use]
    pub fn get(&self, from: char) -> Option<char> {
        self.lookup.get(&from).copied()
    }

    /// Whether `from` has an entry.
    #[must_use]
    pub fn contains_key(&self, from: char) -> bool {
        self.lookup.contains_key(&from)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Images in entry order, as a string.
    #[must_use]
    pub fn targets(&self) -> String {
        self.entries.iter().map(|&(_, to)| to).collect()
    }
}

impl PartialEq for CharacterMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for CharacterMap {}

impl Serialize for CharacterMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CharacterMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(char, char)>::deserialize(deserializer)?;
        Self::new(entries).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_insertion_order() {
        let map = CharacterMap::new([('b', '2'), ('a', '1'), ('c', '3')]).unwrap();
        assert_eq!(map.mappings(), &[('b', '2'), ('a', '1'), ('c', '3')]);
        assert_eq!(map.get('a'), Some('1'));
        assert_eq!(map.get('z'), None);
        assert_eq!(map.len(), 3);
        assert_eq!(map.targets(), "213");
    }

    #[test]
    fn test_rejects_duplicate_source() {
        let err = CharacterMap::new([('a', '1'), ('a', '2')]).unwrap_err();
        assert!(matches!(err, KeyError::InvalidArgument { name: "map", .. }));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let first = CharacterMap::new([('a', '1'), ('b', '2')]).unwrap();
        let same = CharacterMap::new([('a', '1'), ('b', '2')]).unwrap();
        let reordered = CharacterMap::new([('b', '2'), ('a', '1')]).unwrap();
        assert_eq!(first, same);
        assert_ne!(first, reordered);
        assert_eq!(first.lookup(), reordered.lookup());
    }

    #[test]
    fn test_from_targets() {
        let map = CharacterMap::from_targets("ABCDEFGHIJ").unwrap();
        assert_eq!(map.get('0'), Some('A'));
        assert_eq!(map.get('9'), Some('J'));
        assert!(CharacterMap::from_targets("ABC").is_err());
    }

    #[test]
    fn test_from_digit_image_matches_from_targets() {
        let map = CharacterMap::from_digit_image(|d| char::from(b'K' + d));
        assert_eq!(map, CharacterMap::from_targets("KLMNOPQRST").unwrap());
        assert_eq!(map.lookup().len(), 10);
        assert_eq!(map.get('3'), Some('N'));
    }

    #[test]
    fn test_empty_map() {
        let map = CharacterMap::new(std::iter::empty::<(char, char)>()).unwrap();
        assert!(map.is_empty());
        assert!(!map.contains_key('0'));
    }

    #[test]
    fn test_serde_as_pair_list() {
        let map = CharacterMap::new([('0', 'X'), ('1', 'Y')]).unwrap();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"[["0","X"],["1","Y"]]"#);

        let back: CharacterMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);

        assert!(serde_json::from_str::<CharacterMap>(r#"[["0","X"],["0","Y"]]"#).is_err());
    }
}
