//! Core error types for tripwise-core.
//!
//! The scheduling and scoring functions never fail: they degrade to a
//! best-effort result plus advisories. These errors only cover the fallible
//! boundaries around them (preference storage, parsing user input, and
//! validating raw values before they enter the core).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tripwise-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Preference/configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load preferences
    #[error("Failed to load preferences from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save preferences
    #[error("Failed to save preferences to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Dot-path key does not exist
    #[error("Unknown preference key: {0}")]
    UnknownKey(String),

    /// Invalid value for an existing key
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home directory could not be determined
    #[error("Could not determine a configuration directory")]
    NoDataDir,
}

/// Validation errors for raw values entering the core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Automation level outside 1..=4
    #[error("Automation level must be between 1 and 4, got {0}")]
    InvalidAutomationLevel(u8),

    /// Coordinates outside WGS84 bounds or not finite
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
