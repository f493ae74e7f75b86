//! Named weighting strategies and per-category preference tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::candidate::CandidateCategory;
use super::weights::ScoringWeights;

/// Named weighting strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Package {
    /// Price dominant
    CostOptimized,
    /// Rating and uniqueness dominant
    ExperienceOptimized,
    /// Convenience dominant
    TimeOptimized,
    /// User-supplied weights
    #[default]
    Custom,
}

impl Package {
    pub const ALL: [Package; 4] = [
        Package::CostOptimized,
        Package::ExperienceOptimized,
        Package::TimeOptimized,
        Package::Custom,
    ];

    /// Preset weights. `Custom` has no preset and reports balanced.
    pub fn preset_weights(&self) -> ScoringWeights {
        match self {
            Package::CostOptimized => ScoringWeights::new(0.55, 0.20, 0.15, 0.10),
            Package::ExperienceOptimized => ScoringWeights::new(0.10, 0.45, 0.10, 0.35),
            Package::TimeOptimized => ScoringWeights::new(0.15, 0.15, 0.60, 0.10),
            Package::Custom => ScoringWeights::balanced(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Package::CostOptimized => "cost_optimized",
            Package::ExperienceOptimized => "experience_optimized",
            Package::TimeOptimized => "time_optimized",
            Package::Custom => "custom",
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Package {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "cost" | "cost_optimized" => Ok(Package::CostOptimized),
            "experience" | "experience_optimized" => Ok(Package::ExperienceOptimized),
            "time" | "time_optimized" => Ok(Package::TimeOptimized),
            "custom" => Ok(Package::Custom),
            other => Err(format!("unknown package: {other}")),
        }
    }
}

/// Flight preference tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightPreference {
    Cheapest,
    Fastest,
    BestValue,
    /// Follow the package weights
    #[default]
    Custom,
}

/// Hotel preference tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotelPreference {
    Budget,
    TopRated,
    Central,
    #[default]
    Custom,
}

/// Activity preference tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityPreference {
    Budget,
    Popular,
    Unique,
    #[default]
    Custom,
}

impl FlightPreference {
    /// Weights this tag imposes, or `None` to follow the package.
    pub fn weights(&self) -> Option<ScoringWeights> {
        match self {
            FlightPreference::Cheapest => Some(ScoringWeights::new(0.70, 0.10, 0.15, 0.05)),
            FlightPreference::Fastest => Some(ScoringWeights::new(0.10, 0.10, 0.75, 0.05)),
            FlightPreference::BestValue => Some(ScoringWeights::new(0.40, 0.35, 0.15, 0.10)),
            FlightPreference::Custom => None,
        }
    }
}

impl HotelPreference {
    pub fn weights(&self) -> Option<ScoringWeights> {
        match self {
            HotelPreference::Budget => Some(ScoringWeights::new(0.65, 0.20, 0.10, 0.05)),
            HotelPreference::TopRated => Some(ScoringWeights::new(0.10, 0.65, 0.10, 0.15)),
            HotelPreference::Central => Some(ScoringWeights::new(0.15, 0.20, 0.55, 0.10)),
            HotelPreference::Custom => None,
        }
    }
}

impl ActivityPreference {
    pub fn weights(&self) -> Option<ScoringWeights> {
        match self {
            ActivityPreference::Budget => Some(ScoringWeights::new(0.60, 0.20, 0.10, 0.10)),
            ActivityPreference::Popular => Some(ScoringWeights::new(0.10, 0.60, 0.10, 0.20)),
            ActivityPreference::Unique => Some(ScoringWeights::new(0.10, 0.25, 0.05, 0.60)),
            ActivityPreference::Custom => None,
        }
    }
}

/// Package plus optional custom weights and category tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageConfig {
    #[serde(default)]
    pub package: Package,
    /// Used when `package` is `Custom`
    #[serde(default)]
    pub custom_weights: ScoringWeights,
    #[serde(default)]
    pub flight: FlightPreference,
    #[serde(default)]
    pub hotel: HotelPreference,
    #[serde(default)]
    pub activity: ActivityPreference,
}

impl PackageConfig {
    /// Preset package with every category following it.
    pub fn preset(package: Package) -> Self {
        Self {
            package,
            custom_weights: ScoringWeights::balanced(),
            flight: FlightPreference::Custom,
            hotel: HotelPreference::Custom,
            activity: ActivityPreference::Custom,
        }
    }

    /// Custom package with the given weights.
    pub fn custom(weights: ScoringWeights) -> Self {
        Self {
            custom_weights: weights,
            ..Self::preset(Package::Custom)
        }
    }

    /// Package vector before any category override.
    pub fn package_weights(&self) -> ScoringWeights {
        match self.package {
            Package::Custom => self.custom_weights,
            preset => preset.preset_weights(),
        }
    }

    /// Effective (not yet normalized) weights for a category.
    pub fn weights_for(&self, category: CandidateCategory) -> ScoringWeights {
        let tag = match category {
            CandidateCategory::Flight => self.flight.weights(),
            CandidateCategory::Hotel => self.hotel.weights(),
            CandidateCategory::Activity => self.activity.weights(),
        };
        tag.unwrap_or_else(|| self.package_weights())
    }
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self::preset(Package::Custom)
    }
}
