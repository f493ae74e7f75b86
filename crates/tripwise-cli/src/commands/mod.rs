pub mod analyze;
pub mod config;
pub mod estimate;
pub mod schedule;
pub mod select;
pub mod travel;
pub mod trip;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tripwise_core::{PreferenceStore, Preferences, TomlFileStore};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Preference store at `path`, or the default location.
pub fn store(path: Option<PathBuf>) -> Result<TomlFileStore, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(TomlFileStore::new(path)),
        None => Ok(TomlFileStore::default_location()?),
    }
}

pub fn preferences(path: Option<PathBuf>) -> Result<Preferences, Box<dyn std::error::Error>> {
    let store = store(path)?;
    let prefs = store.load()?;
    tracing::debug!(path = %store.path().display(), level = %prefs.automation_level, "loaded preferences");
    Ok(prefs)
}

/// Read a JSON file, or stdin when the path is `-`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?
    };
    Ok(serde_json::from_str(&content)?)
}
