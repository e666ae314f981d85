use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::codec::FallbackMessage;

/// Example configuration file contents (bundled with the library)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Recording configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Keep TLS session descriptors in snapshots
    pub capture_tls: bool,
    /// Rendering of unregistered error messages
    pub fallback_message: FallbackMessage,
    /// Pre-register the built-in transport error types
    pub builtin_types: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture_tls: true,
            fallback_message: FallbackMessage::Outermost,
            builtin_types: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TomlConfig {
    snapshot: Option<TomlSnapshotConfig>,
    errors: Option<TomlErrorsConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TomlSnapshotConfig {
    capture_tls: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TomlErrorsConfig {
    fallback_message: Option<FallbackMessage>,
    builtin_types: Option<bool>,
}

impl Config {
    /// Parse TOML, keeping defaults for anything not set
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(snapshot) = toml_config.snapshot {
            if let Some(capture_tls) = snapshot.capture_tls {
                config.capture_tls = capture_tls;
            }
        }

        if let Some(errors) = toml_config.errors {
            if let Some(fallback_message) = errors.fallback_message {
                config.fallback_message = fallback_message;
            }
            if let Some(builtin_types) = errors.builtin_types {
                config.builtin_types = builtin_types;
            }
        }

        Ok(config)
    }

    /// Load configuration from file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn with_capture_tls(mut self, capture_tls: bool) -> Self {
        self.capture_tls = capture_tls;
        self
    }

    pub fn with_fallback_message(mut self, fallback_message: FallbackMessage) -> Self {
        self.fallback_message = fallback_message;
        self
    }
}
