//! TOML-based user preferences.
//!
//! Stores:
//! - Automation level and selection package
//! - Per-category preference tags
//! - Scheduler, travel and party-scaling parameters
//!
//! Preferences live at `~/.config/tripwise/preferences.toml`. The planning
//! core never reads them directly; callers turn them into plain config
//! values with [`Preferences::package_config`] and friends.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::data_dir;
use crate::automation::AutomationLevel;
use crate::duration::{DurationEstimator, PartyScaling};
use crate::error::{ConfigError, Result};
use crate::geo::{DistanceCalculator, TravelConfig};
use crate::itinerary::{IntelligentScheduler, SchedulerConfig};
use crate::selection::{
    ActivityPreference, FlightPreference, HotelPreference, Package, PackageConfig, ScoringWeights,
};

const FILE_NAME: &str = "preferences.toml";

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub automation_level: AutomationLevel,
    #[serde(default)]
    pub package: Package,
    /// Used when `package` is `custom`
    #[serde(default)]
    pub custom_weights: ScoringWeights,
    #[serde(default)]
    pub flight: FlightPreference,
    #[serde(default)]
    pub hotel: HotelPreference,
    #[serde(default)]
    pub activity: ActivityPreference,
    #[serde(default = "default_party_size")]
    pub party_size: u32,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub travel: TravelConfig,
    #[serde(default)]
    pub duration: PartyScaling,
}

fn default_party_size() -> u32 {
    2
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            automation_level: AutomationLevel::default(),
            package: Package::default(),
            custom_weights: ScoringWeights::default(),
            flight: FlightPreference::default(),
            hotel: HotelPreference::default(),
            activity: ActivityPreference::default(),
            party_size: default_party_size(),
            scheduler: SchedulerConfig::default(),
            travel: TravelConfig::default(),
            duration: PartyScaling::default(),
        }
    }
}

impl Preferences {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let clears = matches!(value.trim().to_ascii_lowercase().as_str(), "null" | "none");
                let new_value = match existing {
                    // Only optional keys survive the round-trip back into Preferences.
                    _ if clears => serde_json::Value::Null,
                    serde_json::Value::Bool(_) => value
                        .parse::<bool>()
                        .map(serde_json::Value::Bool)
                        .map_err(|e| invalid(e.to_string()))?,
                    serde_json::Value::Number(_) => parse_number(value)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // Unset optional: accept a number or JSON literal, else a string.
                    serde_json::Value::Null => serde_json::from_str(value)
                        .unwrap_or_else(|_| serde_json::Value::String(value.into())),
                    serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Get a preference value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a preference by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// key's type. The preferences are left untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// All leaf keys with their values, in dot-path form.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            flatten_into(&json, String::new(), &mut out);
        }
        out
    }

    pub fn package_config(&self) -> PackageConfig {
        PackageConfig {
            package: self.package,
            custom_weights: self.custom_weights,
            flight: self.flight,
            hotel: self.hotel,
            activity: self.activity,
        }
    }

    /// Scheduler wired up with these preferences' parameters.
    pub fn scheduler(&self) -> IntelligentScheduler {
        IntelligentScheduler::with_components(
            self.scheduler.clone(),
            DurationEstimator::with_scaling(self.duration.clone()),
            DistanceCalculator::with_config(self.travel.clone()),
        )
    }

    pub fn distance_calculator(&self) -> DistanceCalculator {
        DistanceCalculator::with_config(self.travel.clone())
    }

    pub fn duration_estimator(&self) -> DurationEstimator {
        DurationEstimator::with_scaling(self.duration.clone())
    }
}

fn parse_number(value: &str) -> Option<serde_json::Value> {
    if let Ok(n) = value.parse::<u64>() {
        return Some(serde_json::Value::Number(n.into()));
    }
    if let Ok(n) = value.parse::<i64>() {
        return Some(serde_json::Value::Number(n.into()));
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(serde_json::Value::Number)
}

fn flatten_into(value: &serde_json::Value, prefix: String, out: &mut Vec<(String, String)>) {
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten_into(v, key, out);
            }
        }
        serde_json::Value::String(s) => out.push((prefix, s.clone())),
        other => out.push((prefix, other.to_string())),
    }
}

/// Where preferences are persisted.
pub trait PreferenceStore {
    /// Load preferences; a store with nothing saved yields defaults.
    fn load(&self) -> Result<Preferences>;

    fn save(&self, preferences: &Preferences) -> Result<()>;

    /// Load, falling back to defaults on any error.
    fn load_or_default(&self) -> Preferences {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load preferences, using defaults");
            Preferences::default()
        })
    }
}

/// Preferences in a TOML file.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.config/tripwise[-dev]/preferences.toml`.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(data_dir()?.join(FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for TomlFileStore {
    fn load(&self) -> Result<Preferences> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no preferences file, using defaults");
                return Ok(Preferences::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        Ok(toml::from_str(&content)?)
    }

    fn save(&self, preferences: &Preferences) -> Result<()> {
        let content = toml::to_string_pretty(preferences)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        }
        std::fs::write(&self.path, content).map_err(|e| ConfigError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %self.path.display(), "saved preferences");
        Ok(())
    }
}

/// In-memory store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    preferences: RwLock<Option<Preferences>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: Preferences) -> Self {
        Self {
            preferences: RwLock::new(Some(preferences)),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Preferences> {
        let guard = self.preferences.read().map_err(|_| ConfigError::LoadFailed {
            path: PathBuf::from("<memory>"),
            message: "lock poisoned".to_string(),
        })?;
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, preferences: &Preferences) -> Result<()> {
        let mut guard = self.preferences.write().map_err(|_| ConfigError::SaveFailed {
            path: PathBuf::from("<memory>"),
            message: "lock poisoned".to_string(),
        })?;
        *guard = Some(preferences.clone());
        Ok(())
    }
}
