// src/config/mod.rs
mod schema;

use std::path::{Path, PathBuf};
use config::{Config as ConfigLoader, FileFormat};
use tracing::{info, warn};

pub use schema::{
    Config, FetchConfig, GenerationConfig, PitchConfig,
    BatchConfig, ReportConfig
};

use crate::error::{LeadsmithResult, LeadsmithError};

/// Prefix for environment overrides, e.g. `LEADSMITH_GENERATION__API_KEY`.
pub const ENV_PREFIX: &str = "LEADSMITH";

/// Slack on top of the slowest fetch plus both generation attempts
pub const TOKEN_TIMEOUT_MARGIN_SECS: u64 = 10;

/// Largest page-text prefix handed to the generator
pub const MAX_TEXT_CHARS_LIMIT: usize = 6000;

const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Centralized configuration handling
impl Config {
    /// Load configuration: built-in defaults, then a user file, then environment variables
    pub fn load(config_path: Option<&Path>) -> LeadsmithResult<Self> {
        info!("Loading configuration");

        let mut config_builder = ConfigLoader::builder();

        // Default configuration
        config_builder = config_builder.add_source(
            config::File::from_str(DEFAULT_CONFIG, FileFormat::Toml)
        );

        // User-provided configuration
        if let Some(path) = config_path {
            if path.exists() {
                config_builder = config_builder.add_source(config::File::from(path));
                info!("Loading user configuration from: {}", path.display());
            } else {
                warn!("Specified configuration file not found: {}", path.display());
            }
        } else {
            let default_path = Self::get_default_config_path();
            if default_path.exists() {
                config_builder = config_builder.add_source(config::File::from(default_path.as_path()));
                info!("Loading default configuration from: {}", default_path.display());
            } else {
                info!("No existing configuration found, using built-in defaults");
            }
        }

        // Environment variables
        config_builder = config_builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
        );

        let config: Config = match config_builder.build() {
            Ok(c) => match c.try_deserialize() {
                Ok(config) => config,
                Err(e) => return Err(LeadsmithError::ConfigError(format!("Failed to parse configuration: {}", e))),
            },
            Err(e) => return Err(LeadsmithError::ConfigError(format!("Failed to build configuration: {}", e))),
        };

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration path
    pub fn get_default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".leadsmith/config.toml")
    }

    /// Write the default configuration to `path` (or the default location)
    pub fn init(path: Option<&Path>, force: bool) -> LeadsmithResult<PathBuf> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::get_default_config_path);

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| LeadsmithError::FileError {
                        path: parent.to_path_buf(),
                        message: format!("Failed to create directory: {}", e),
                    })?;
            }
        }

        if config_path.exists() && !force {
            return Err(LeadsmithError::ConfigError(
                format!("Configuration already exists at {}. Use --force to overwrite.", config_path.display())
            ));
        }

        Config::default().save(&config_path)?;

        Ok(config_path)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> LeadsmithResult<()> {
        let config_str = self.to_toml()?;

        std::fs::write(path, config_str)
            .map_err(|e| LeadsmithError::FileError {
                path: path.to_path_buf(),
                message: format!("Failed to write configuration: {}", e),
            })?;

        info!("Configuration saved to {}", path.display());

        Ok(())
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> LeadsmithResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| LeadsmithError::SerializationError(format!("Failed to serialize configuration: {}", e)))
    }

    /// Copy of the configuration with credentials masked, for display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.generation.api_key.is_some() {
            copy.generation.api_key = Some("********".to_string());
        }
        copy
    }

    /// Shortest per-token limit that still lets a token reach the template
    /// pitch: one fetch, the primary and secondary model attempts, and a margin.
    pub fn min_token_timeout_secs(&self) -> u64 {
        self.fetch.timeout_secs
            + 2 * self.generation.timeout_secs
            + TOKEN_TIMEOUT_MARGIN_SECS
    }

    /// Reject values that would make the pipeline unbounded or inert
    pub fn validate(&self) -> LeadsmithResult<()> {
        if self.fetch.timeout_secs == 0 {
            return Err(LeadsmithError::ConfigError("fetch.timeout_secs must be greater than zero".to_string()));
        }
        if self.generation.timeout_secs == 0 {
            return Err(LeadsmithError::ConfigError("generation.timeout_secs must be greater than zero".to_string()));
        }
        if self.batch.max_concurrent == 0 {
            return Err(LeadsmithError::ConfigError("batch.max_concurrent must be at least 1".to_string()));
        }
        if self.batch.token_timeout_secs == 0 {
            return Err(LeadsmithError::ConfigError("batch.token_timeout_secs must be greater than zero".to_string()));
        }
        if self.batch.token_timeout_secs < self.min_token_timeout_secs() {
            return Err(LeadsmithError::ConfigError(format!(
                "batch.token_timeout_secs must be at least {} (fetch.timeout_secs + 2 * generation.timeout_secs + {})",
                self.min_token_timeout_secs(),
                TOKEN_TIMEOUT_MARGIN_SECS
            )));
        }
        if self.batch.requests_per_minute == 0 {
            return Err(LeadsmithError::ConfigError("batch.requests_per_minute must be at least 1".to_string()));
        }
        if self.fetch.max_text_chars == 0 || self.fetch.max_text_chars > MAX_TEXT_CHARS_LIMIT {
            return Err(LeadsmithError::ConfigError(format!(
                "fetch.max_text_chars must be between 1 and {}",
                MAX_TEXT_CHARS_LIMIT
            )));
        }
        Ok(())
    }
}
