//! lasercam Settings Crate
//!
//! Handles the run configuration: built-in defaults, the plain `key = value`
//! configuration format, TOML/JSON files, and validation.

pub mod config;
pub mod error;
pub mod key_value;

pub use config::Configuration;
pub use error::{ConfigError, ConfigWarning, SettingsError, SettingsResult};
pub use key_value::ConfigValue;
