//! Chain state threaded between generation calls.

use std::fmt;
use std::str::FromStr;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::KeyError;

/// Length of the textual token form (8 bytes of URL-safe base64).
pub const SEED_TOKEN_LENGTH: usize = 11;

/// Opaque generation state.
///
/// Every generation call returns one; passing it to the next call continues
/// the chain and guarantees the next key differs from the current one. The
/// textual form is an 11 character URL-safe token, so a chain can be resumed
/// across process boundaries.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationSeed(u64);

impl GenerationSeed {
    pub(crate) const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    pub(crate) const fn raw(self) -> u64 {
        self.0
    }

    /// Seed that the call consuming `self` will hand back.
    pub(crate) const fn successor(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Encode as a URL-safe token.
    #[must_use]
    pub fn to_token(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.to_be_bytes())
    }
}

impl fmt::Debug for GenerationSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GenerationSeed")
            .field(&self.to_token())
            .finish()
    }
}

impl fmt::Display for GenerationSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token())
    }
}

impl FromStr for GenerationSeed {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != SEED_TOKEN_LENGTH {
            return Err(KeyError::invalid(
                "seed",
                format!("expected {SEED_TOKEN_LENGTH} characters, got {}", s.len()),
            ));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .map_err(|e| KeyError::invalid("seed", e.to_string()))?;
        let raw: [u8; 8] = bytes
            .try_into()
            .map_err(|_| KeyError::invalid("seed", "token does not decode to 8 bytes"))?;

        Ok(Self(u64::from_be_bytes(raw)))
    }
}

impl Serialize for GenerationSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_token())
    }
}

impl<'de> Deserialize<'de> for GenerationSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let seed = GenerationSeed::from_raw(0x0123_4567_89AB_CDEF);
        let token = seed.to_token();
        assert_eq!(token.len(), SEED_TOKEN_LENGTH);
        assert_eq!(token.parse::<GenerationSeed>().unwrap(), seed);
        assert_eq!(seed.to_string(), token);
    }

    #[test]
    fn test_successor_differs() {
        let seed = GenerationSeed::from_raw(41);
        assert_eq!(seed.successor().raw(), 42);
        assert_ne!(seed.successor(), seed);

        let last = GenerationSeed::from_raw(u64::MAX);
        assert_eq!(last.successor().raw(), 0);
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert!("".parse::<GenerationSeed>().is_err());
        assert!("short".parse::<GenerationSeed>().is_err());
        assert!("!!!!!!!!!!!".parse::<GenerationSeed>().is_err());
        assert!("AAAAAAAAAAAAAAAA".parse::<GenerationSeed>().is_err());

        let err = "short".parse::<GenerationSeed>().unwrap_err();
        assert!(matches!(err, KeyError::InvalidArgument { name: "seed", .. }));
    }

    #[test]
    fn test_serde_as_token() {
        let seed = GenerationSeed::from_raw(7);
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, format!("\"{}\"", seed.to_token()));
        let back: GenerationSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seed);
    }
}
