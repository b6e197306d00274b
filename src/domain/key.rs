//! Generation output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::GenerationSeed;

/// A formatted key together with the seed that continues its chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedKey {
    value: String,
    seed: GenerationSeed,
}

impl GeneratedKey {
    pub(crate) const fn new(value: String, seed: GenerationSeed) -> Self {
        Self { value, seed }
    }

    /// The formatted key.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Seed to pass to the next generation call.
    #[must_use]
    pub const fn seed(&self) -> GenerationSeed {
        self.seed
    }

    /// Split into the key string and the next seed.
    #[must_use]
    pub fn into_parts(self) -> (String, GenerationSeed) {
        (self.value, self.seed)
    }
}

impl fmt::Display for GeneratedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
