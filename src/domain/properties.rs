//! Key format configuration.
//!
//! [`KeyFormatProperties`] fixes the shape of every key a generator emits:
//! separator, component length and count, advisory prefix length, and the
//! two digit maps that turn raw digits into output characters.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::domain::CharacterMap;
use crate::error::{KeyError, KeyResult};

/// Smallest allowed component length.
pub const MIN_COMPONENT_LENGTH: usize = 2;
/// Largest allowed component length.
pub const MAX_COMPONENT_LENGTH: usize = 10;
/// Smallest allowed component count.
pub const MIN_COMPONENT_COUNT: usize = 2;
/// Largest allowed component count.
pub const MAX_COMPONENT_COUNT: usize = 10;
/// Smallest allowed prefix length (0 = keys carry no prefix).
pub const MIN_PREFIX_LENGTH: usize = 0;
/// Largest allowed prefix length.
pub const MAX_PREFIX_LENGTH: usize = 10;

const DEFAULT_SEPARATOR: char = '-';
const DEFAULT_COMPONENT_LENGTH: usize = 4;
const DEFAULT_COMPONENT_COUNT: usize = 4;
const DEFAULT_PREFIX_LENGTH: usize = 4;

const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Which alphabet a digit map must map into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetAlphabet {
    Digits,
    UppercaseLetters,
}

impl TargetAlphabet {
    const fn accepts(self, c: char) -> bool {
        match self {
            Self::Digits => c.is_ascii_digit(),
            Self::UppercaseLetters => c.is_ascii_uppercase(),
        }
    }

    const fn describe(self) -> &'static str {
        match self {
            Self::Digits => "a decimal digit",
            Self::UppercaseLetters => "an uppercase letter",
        }
    }
}

/// Validated key format.
///
/// Scalar fields are fixed at construction. The two maps sit behind locks so
/// they can be replaced on a shared instance; a replacement is validated in
/// full before it is swapped in, and readers see either the old map or the
/// new one.
#[derive(Debug)]
pub struct KeyFormatProperties {
    separator: char,
    component_length: usize,
    component_count: usize,
    prefix_length: usize,
    digit_to_digit: RwLock<Arc<CharacterMap>>,
    digit_to_letter: RwLock<Arc<CharacterMap>>,
}

impl KeyFormatProperties {
    /// Create a format with the canonical digit maps.
    ///
    /// # Errors
    ///
    /// - [`KeyError::InvalidArgument`] if `separator` is whitespace.
    /// - [`KeyError::OutOfRange`] if a length or count is outside its bounds.
    pub fn new(
        separator: char,
        component_length: usize,
        component_count: usize,
        prefix_length: usize,
    ) -> KeyResult<Self> {
        if separator.is_whitespace() {
            return Err(KeyError::invalid(
                "separator",
                "must not be a whitespace character",
            ));
        }
        check_range(
            "component_length",
            component_length,
            MIN_COMPONENT_LENGTH,
            MAX_COMPONENT_LENGTH,
        )?;
        check_range(
            "component_count",
            component_count,
            MIN_COMPONENT_COUNT,
            MAX_COMPONENT_COUNT,
        )?;
        check_range(
            "prefix_length",
            prefix_length,
            MIN_PREFIX_LENGTH,
            MAX_PREFIX_LENGTH,
        )?;

        Ok(Self::with_default_maps(
            separator,
            component_length,
            component_count,
            prefix_length,
        ))
    }

    /// Replace both maps at once, consuming `self`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidArgument`] if either map fails validation.
    pub fn with_maps(
        self,
        digit_to_digit: CharacterMap,
        digit_to_letter: CharacterMap,
    ) -> KeyResult<Self> {
        validate_digit_map("digit_to_digit", &digit_to_digit, TargetAlphabet::Digits)?;
        validate_digit_map(
            "digit_to_letter",
            &digit_to_letter,
            TargetAlphabet::UppercaseLetters,
        )?;
        *self.digit_to_digit.write() = Arc::new(digit_to_digit);
        *self.digit_to_letter.write() = Arc::new(digit_to_letter);
        Ok(self)
    }

    fn with_default_maps(
        separator: char,
        component_length: usize,
        component_count: usize,
        prefix_length: usize,
    ) -> Self {
        Self {
            separator,
            component_length,
            component_count,
            prefix_length,
            digit_to_digit: RwLock::new(Arc::new(Self::default_digit_to_digit_map())),
            digit_to_letter: RwLock::new(Arc::new(Self::default_digit_to_letter_map())),
        }
    }

    /// The canonical digit to digit map: the involution 0↔9, 1↔8, 2↔7, 3↔6,
    /// 4↔5, keyed in ascending digit order.
    #[must_use]
    pub fn default_digit_to_digit_map() -> CharacterMap {
        CharacterMap::from_digit_image(|d| char::from(b'9' - d))
    }

    /// The canonical digit to letter map: 0→A through 9→J.
    #[must_use]
    pub fn default_digit_to_letter_map() -> CharacterMap {
        CharacterMap::from_digit_image(|d| char::from(b'A' + d))
    }

    /// Install a new digit to digit map.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidArgument`] unless `map` has exactly the keys
    /// `'0'..='9'` and every value is a decimal digit. The current map is
    /// kept on failure.
    pub fn replace_digit_to_digit_map(&self, map: CharacterMap) -> KeyResult<()> {
        validate_digit_map("digit_to_digit", &map, TargetAlphabet::Digits)?;
        *self.digit_to_digit.write() = Arc::new(map);
        tracing::info!("Digit to digit map replaced");
        Ok(())
    }

    /// Install a new digit to letter map.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidArgument`] unless `map` has exactly the keys
    /// `'0'..='9'` and every value is an uppercase letter. The current map is
    /// kept on failure.
    pub fn replace_digit_to_letter_map(&self, map: CharacterMap) -> KeyResult<()> {
        validate_digit_map("digit_to_letter", &map, TargetAlphabet::UppercaseLetters)?;
        *self.digit_to_letter.write() = Arc::new(map);
        tracing::info!("Digit to letter map replaced");
        Ok(())
    }

    /// Separator placed between components and after a prefix.
    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Characters per component.
    #[must_use]
    pub const fn component_length(&self) -> usize {
        self.component_length
    }

    /// Components per key.
    #[must_use]
    pub const fn component_count(&self) -> usize {
        self.component_count
    }

    /// Advisory prefix length; 0 means the format carries no prefix.
    #[must_use]
    pub const fn prefix_length(&self) -> usize {
        self.prefix_length
    }

    /// Whether this format expects prefixed keys.
    #[must_use]
    pub const fn uses_prefix(&self) -> bool {
        self.prefix_length > 0
    }

    /// Snapshot of the current digit to digit map.
    #[must_use]
    pub fn digit_to_digit_map(&self) -> Arc<CharacterMap> {
        Arc::clone(&self.digit_to_digit.read())
    }

    /// Snapshot of the current digit to letter map.
    #[must_use]
    pub fn digit_to_letter_map(&self) -> Arc<CharacterMap> {
        Arc::clone(&self.digit_to_letter.read())
    }

    /// Number of generated characters per key, separators excluded.
    #[must_use]
    pub const fn digit_count(&self) -> usize {
        self.component_count * self.component_length
    }

    /// Length in characters of an unprefixed key.
    #[must_use]
    pub const fn key_length(&self) -> usize {
        self.digit_count() + self.component_count - 1
    }

    /// Length in characters of a key carrying a prefix of `prefix_chars`
    /// characters.
    #[must_use]
    pub const fn prefixed_key_length(&self, prefix_chars: usize) -> usize {
        prefix_chars + 1 + self.key_length()
    }

    /// Serializable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> KeyFormatSnapshot {
        KeyFormatSnapshot {
            separator: self.separator,
            component_length: self.component_length,
            component_count: self.component_count,
            prefix_length: self.prefix_length,
            uses_prefix: self.uses_prefix(),
            key_length: self.key_length(),
            digit_to_digit: CharacterMap::clone(&self.digit_to_digit_map()),
            digit_to_letter: CharacterMap::clone(&self.digit_to_letter_map()),
        }
    }
}

impl Default for KeyFormatProperties {
    /// `'-'` separator, four components of four characters, prefix length 4.
    fn default() -> Self {
        Self::with_default_maps(
            DEFAULT_SEPARATOR,
            DEFAULT_COMPONENT_LENGTH,
            DEFAULT_COMPONENT_COUNT,
            DEFAULT_PREFIX_LENGTH,
        )
    }
}

impl Clone for KeyFormatProperties {
    fn clone(&self) -> Self {
        Self {
            separator: self.separator,
            component_length: self.component_length,
            component_count: self.component_count,
            prefix_length: self.prefix_length,
            digit_to_digit: RwLock::new(self.digit_to_digit_map()),
            digit_to_letter: RwLock::new(self.digit_to_letter_map()),
        }
    }
}

impl PartialEq for KeyFormatProperties {
    fn eq(&self, other: &Self) -> bool {
        self.separator == other.separator
            && self.component_length == other.component_length
            && self.component_count == other.component_count
            && self.prefix_length == other.prefix_length
            && *self.digit_to_digit_map() == *other.digit_to_digit_map()
            && *self.digit_to_letter_map() == *other.digit_to_letter_map()
    }
}

/// Point-in-time view of a [`KeyFormatProperties`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyFormatSnapshot {
    /// Separator character.
    pub separator: char,
    /// Characters per component.
    pub component_length: usize,
    /// Components per key.
    pub component_count: usize,
    /// Advisory prefix length.
    pub prefix_length: usize,
    /// Whether the format expects prefixed keys.
    pub uses_prefix: bool,
    /// Length of an unprefixed key.
    pub key_length: usize,
    /// Digit to digit map.
    pub digit_to_digit: CharacterMap,
    /// Digit to letter map.
    pub digit_to_letter: CharacterMap,
}

fn check_range(name: &'static str, value: usize, min: usize, max: usize) -> KeyResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(KeyError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// Check that `map` is keyed by exactly the ten decimal digits and maps into
/// `alphabet`.
fn validate_digit_map(
    name: &'static str,
    map: &CharacterMap,
    alphabet: TargetAlphabet,
) -> KeyResult<()> {
    if map.len() != DIGITS.len() {
        return Err(KeyError::invalid(
            name,
            format!("expected exactly 10 entries, got {}", map.len()),
        ));
    }

    if let Some(missing) = DIGITS.iter().find(|d| !map.contains_key(**d)) {
        return Err(KeyError::invalid(
            name,
            format!("missing mapping for digit '{missing}'"),
        ));
    }

    if let Some((from, to)) = map.mappings().iter().find(|(_, to)| !alphabet.accepts(*to)) {
        return Err(KeyError::invalid(
            name,
            format!(
                "'{from}' maps to '{to}', expected {}",
                alphabet.describe()
            ),
        ));
    }

    Ok(())
}
