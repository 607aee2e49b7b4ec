//! Error types for the settings crate.
//!
//! Fatal problems (invalid values, malformed TOML/JSON) are reported as
//! [`SettingsError`]. Recoverable problems with the configuration file are
//! collected as [`ConfigWarning`]s so callers can tell them apart from fatal
//! errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file could not be loaded.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// The configuration file could not be saved.
    #[error("Failed to save settings: {0}")]
    SaveError(String),

    /// A configuration value is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A configuration validation error occurred.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to configuration validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file format is not supported for this operation.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A configuration value is out of valid range.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },
}

/// Recoverable configuration problems. Defaults stay in effect for whatever
/// the warning concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// No configuration file at the given path.
    #[error("Configuration file {0} not found, using defaults")]
    FileMissing(PathBuf),

    /// The file exists but could not be read.
    #[error("Configuration file {path} unreadable ({reason}), using defaults")]
    Unreadable { path: PathBuf, reason: String },

    /// A line without a `key = value` pair.
    #[error("Line {line}: ignoring malformed entry '{text}'")]
    MalformedLine { line: usize, text: String },

    /// A key that does not name any setting.
    #[error("Line {line}: ignoring unknown key '{key}'")]
    UnknownKey { line: usize, key: String },

    /// A value whose type does not fit the setting.
    #[error("Line {line}: value '{value}' does not fit '{key}', keeping default")]
    TypeMismatch {
        line: usize,
        key: String,
        value: String,
    },
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for configuration validation.
pub type ConfigResult<T> = Result<T, ConfigError>;
