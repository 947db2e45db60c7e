//! Configuration management for pagoda-transformer
//!
//! Handles loading and validating configuration from YAML files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Error parsing the configuration file
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Transform behavior
    #[serde(default)]
    pub transform: TransformConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Transform endpoint path
    #[serde(default = "default_transform_path")]
    pub path: String,

    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

/// Transform behavior configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    /// What to do when a metric violates the schema contract
    #[serde(default)]
    pub on_metric_error: MetricErrorPolicy,

    /// Pretty-print encoded output documents
    #[serde(default)]
    pub pretty_output: bool,
}

/// Per-metric error policy names accepted in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricErrorPolicy {
    /// Fail the whole batch on the first violating metric
    #[default]
    Abort,
    /// Omit violating metrics and report them
    Skip,
}

// Default value functions
fn default_port() -> u16 {
    9090
}

fn default_transform_path() -> String {
    "/transform".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            path: default_transform_path(),
            bind_address: default_bind_address(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    ///
    /// # Note
    /// - If the file doesn't exist, returns `ConfigError::ReadError`
    /// - Use `Config::load_or_default()` if you want fallback to defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file, falling back to defaults if not found
    ///
    /// Use this for optional configuration files (e.g., when running without explicit config)
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        Self::load(path)
    }

    /// Validate the configuration
    ///
    /// Also called after CLI overrides are applied, so it is public.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if !self.server.path.starts_with('/') {
            return Err(ConfigError::ValidationError(
                "Transform path must start with '/'".to_string(),
            ));
        }

        if self.server.path == "/" || self.server.path == "/health" {
            return Err(ConfigError::ValidationError(format!(
                "Transform path '{}' conflicts with a built-in endpoint",
                self.server.path
            )));
        }

        Ok(())
    }
}
