//! Key format configuration.

use config::ConfigError;
use serde::Deserialize;

use crate::domain::{CharacterMap, KeyFormatProperties};
use crate::error::{KeyError, KeyResult};

/// Key format section.
///
/// The optional maps are written as ten-character strings whose i-th
/// character is the image of digit `i`, e.g. `digit_to_letter = "QWERTYUIOP"`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyFormatConfig {
    /// Separator between components (a single character).
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Characters per component.
    #[serde(default = "default_component_length")]
    pub component_length: usize,

    /// Components per key.
    #[serde(default = "default_component_count")]
    pub component_count: usize,

    /// Advisory prefix length (0 = no prefix).
    #[serde(default = "default_prefix_length")]
    pub prefix_length: usize,

    /// Digit to digit map override.
    #[serde(default)]
    pub digit_to_digit: Option<String>,

    /// Digit to letter map override.
    #[serde(default)]
    pub digit_to_letter: Option<String>,
}

fn default_separator() -> String {
    "-".to_string()
}

const fn default_component_length() -> usize {
    4
}

const fn default_component_count() -> usize {
    4
}

const fn default_prefix_length() -> usize {
    4
}

impl KeyFormatConfig {
    /// Build the key format described by this section.
    ///
    /// # Errors
    ///
    /// Returns the validation error raised by [`KeyFormatProperties`] or
    /// [`CharacterMap`].
    pub fn build(&self) -> KeyResult<KeyFormatProperties> {
        let properties = KeyFormatProperties::new(
            self.separator_char()?,
            self.component_length,
            self.component_count,
            self.prefix_length,
        )?;

        if let Some(targets) = &self.digit_to_digit {
            properties.replace_digit_to_digit_map(CharacterMap::from_targets(targets)?)?;
        }
        if let Some(targets) = &self.digit_to_letter {
            properties.replace_digit_to_letter_map(CharacterMap::from_targets(targets)?)?;
        }

        Ok(properties)
    }

    fn separator_char(&self) -> KeyResult<char> {
        let mut chars = self.separator.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(KeyError::invalid(
                "separator",
                format!("expected a single character, got {:?}", self.separator),
            )),
        }
    }

    /// Validate the key format configuration.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.build()
            .map(|_| ())
            .map_err(|e| ConfigError::Message(format!("key_format: {e}")))
    }
}

impl Default for KeyFormatConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            component_length: default_component_length(),
            component_count: default_component_count(),
            prefix_length: default_prefix_length(),
            digit_to_digit: None,
            digit_to_letter: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_default_properties() {
        let properties = KeyFormatConfig::default().build().unwrap();
        assert_eq!(properties, KeyFormatProperties::default());
    }

    #[test]
    fn test_map_overrides() {
        let config = KeyFormatConfig {
            digit_to_digit: Some("1234567890".to_string()),
            digit_to_letter: Some("QWERTYUIOP".to_string()),
            ..Default::default()
        };
        let properties = config.build().unwrap();
        assert_eq!(properties.digit_to_digit_map().get('0'), Some('1'));
        assert_eq!(properties.digit_to_letter_map().get('9'), Some('P'));
    }

    #[test]
    fn test_invalid_separator() {
        for separator in ["", "--", " "] {
            let config = KeyFormatConfig {
                separator: separator.to_string(),
                ..Default::default()
            };
            assert!(matches!(
                config.build(),
                Err(KeyError::InvalidArgument {
                    name: "separator",
                    ..
                })
            ));
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_invalid_bounds_and_maps() {
        let config = KeyFormatConfig {
            component_count: 0,
            ..Default::default()
        };
        assert!(matches!(config.build(), Err(KeyError::OutOfRange { .. })));

        let config = KeyFormatConfig {
            digit_to_letter: Some("0123456789".to_string()),
            ..Default::default()
        };
        assert!(config.build().is_err());

        let config = KeyFormatConfig {
            digit_to_digit: Some("123".to_string()),
            ..Default::default()
        };
        assert!(config.build().is_err());
    }
}
