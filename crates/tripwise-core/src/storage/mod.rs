mod preferences;

pub use preferences::{MemoryStore, PreferenceStore, Preferences, TomlFileStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/tripwise[-dev]/` based on TRIPWISE_ENV.
///
/// Set TRIPWISE_ENV=dev to use the development directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir().ok_or(ConfigError::NoDataDir)?.join(".config");

    let env = std::env::var("TRIPWISE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tripwise-dev")
    } else {
        base_dir.join("tripwise")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
