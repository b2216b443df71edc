//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! CLI arguments. Priority: CLI > environment > file > defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use risk_engine::MergeMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("{0}")]
    InvalidMergeMode(String),

    #[error("Environment variable {var} has invalid value '{value}'")]
    EnvError { var: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Configuration validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxspanConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Directory for generated files without an explicit path
    pub output_dir: PathBuf,
    /// Contributors listed in the portfolio report
    pub top_contributors: usize,
    /// Scenarios listed in the portfolio report
    pub scenario_preview: usize,
    /// Default merge mode
    pub merge_mode: MergeMode,
    /// Field delimiter for CSV input and output
    pub csv_delimiter: char,
}

impl Default for MaxspanConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            output_dir: PathBuf::from("."),
            top_contributors: 15,
            scenario_preview: 20,
            merge_mode: MergeMode::MergeMax,
            csv_delimiter: ',',
        }
    }
}

impl MaxspanConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load from `path` when it exists, otherwise start from defaults
    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply `MAXSPAN_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an environment lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("MAXSPAN_LOG_LEVEL") {
            self.log_level = level.parse()?;
        }

        if let Some(dir) = lookup("MAXSPAN_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup("MAXSPAN_TOP_CONTRIBUTORS") {
            self.top_contributors = value.trim().parse().map_err(|_| ConfigError::EnvError {
                var: "MAXSPAN_TOP_CONTRIBUTORS",
                value,
            })?;
        }

        if let Some(value) = lookup("MAXSPAN_SCENARIO_PREVIEW") {
            self.scenario_preview = value.trim().parse().map_err(|_| ConfigError::EnvError {
                var: "MAXSPAN_SCENARIO_PREVIEW",
                value,
            })?;
        }

        if let Some(mode) = lookup("MAXSPAN_MERGE_MODE") {
            self.merge_mode = mode.parse().map_err(ConfigError::InvalidMergeMode)?;
        }

        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.top_contributors == 0 {
            errors.push("top_contributors must be greater than 0".to_string());
        }

        if self.scenario_preview == 0 {
            errors.push("scenario_preview must be greater than 0".to_string());
        }

        if self.output_dir.as_os_str().is_empty() {
            errors.push("output_dir must not be empty".to_string());
        }

        if !self.csv_delimiter.is_ascii() || self.csv_delimiter.is_ascii_alphanumeric() {
            errors.push(format!(
                "Invalid csv_delimiter '{}'. Must be a single ASCII punctuation or whitespace character",
                self.csv_delimiter
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// CSV delimiter as a byte
    pub fn delimiter(&self) -> u8 {
        u8::try_from(self.csv_delimiter).unwrap_or(b',')
    }
}

/// Build configuration from file, environment and CLI arguments
pub fn build_config(
    config_path: &Path,
    cli_log_level: Option<&str>,
    cli_output_dir: Option<&Path>,
) -> Result<MaxspanConfig, ConfigError> {
    let mut config = MaxspanConfig::from_file_or_default(config_path)?.with_env_override()?;

    if let Some(level) = cli_log_level {
        config.log_level = level.parse()?;
    }

    if let Some(dir) = cli_output_dir {
        config.output_dir = dir.to_path_buf();
    }

    config.validate()?;
    Ok(config)
}
