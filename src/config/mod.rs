//! Configuration management module.
//!
//! Supports loading configuration from:
//! - A `.env` file in the working directory (if present)
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `KEYGEN_WORKER__<SECTION>__<KEY>` pattern

mod key_format;
mod server;

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use key_format::KeyFormatConfig;
pub use server::ServerConfig;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Key format configuration.
    #[serde(default)]
    pub key_format: KeyFormatConfig,

    /// Key generation limits.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{KEYGEN_PROFILE}.toml` (if `KEYGEN_PROFILE` is set)
    /// 3. Environment variables with `KEYGEN_WORKER__` prefix
    ///
    /// A `.env` file is read into the process environment first.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is not an error
        let _ = dotenvy::dotenv();
        Self::load_from(Path::new("config"))
    }

    /// Load configuration from `dir` and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        Self::load_with(dir, Self::environment())
    }

    /// Environment source: `KEYGEN_WORKER__SERVER__PORT=8080` -> `server.port`.
    ///
    /// Values stay strings until deserialization, so map overrides such as
    /// `KEYGEN_WORKER__KEY_FORMAT__DIGIT_TO_DIGIT=0123456789` keep their
    /// leading zeros. Numeric and boolean fields are converted by serde.
    fn environment() -> Environment {
        Environment::with_prefix("KEYGEN_WORKER").separator("__")
    }

    fn load_with(dir: &Path, environment: Environment) -> Result<Self, ConfigError> {
        // Determine profile
        let profile =
            std::env::var("KEYGEN_PROFILE").unwrap_or_else(|_| "development".to_string());

        let default_file = dir.join("default");
        let profile_file = dir.join(&profile);

        // Build configuration
        let config = Config::builder()
            // Load default configuration
            .add_source(File::from(default_file).required(false))
            // Load profile-specific configuration
            .add_source(File::from(profile_file).required(false))
            // Override with environment variables
            .add_source(environment)
            .build()?;

        // Deserialize and validate
        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        // Validate server config
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        // Validate key format
        self.key_format.validate()?;

        // Validate generation config
        if self.generation.max_batch_size == 0 {
            return Err(ConfigError::Message(
                "generation.max_batch_size cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Key generation limits.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Maximum number of keys per generation request.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: u32,
}

const fn default_max_batch_size() -> u32 {
    1000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Enable Prometheus metrics endpoint.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,

    /// Metrics endpoint path.
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_metrics_enabled() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_metrics_enabled(),
            metrics_path: default_metrics_path(),
        }
    }
}
