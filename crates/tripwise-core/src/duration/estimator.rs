//! Activity duration estimation.
//!
//! Each category has a base (min, max) range in minutes. Larger parties take
//! longer: the range is scaled by a multiplier that grows logarithmically
//! with the number of people above the baseline and is capped.

use serde::{Deserialize, Serialize};

use super::category::ActivityCategory;

/// Estimated duration range for an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationEstimate {
    pub minimum_minutes: i64,
    pub maximum_minutes: i64,
    pub description: String,
}

impl DurationEstimate {
    /// Midpoint of the range, rounded down.
    pub fn midpoint(&self) -> i64 {
        (self.minimum_minutes + self.maximum_minutes) / 2
    }

    /// Pick the value the given policy asks for.
    pub fn resolve(&self, policy: DurationPolicy) -> i64 {
        match policy {
            DurationPolicy::Minimum => self.minimum_minutes,
            DurationPolicy::Midpoint => self.midpoint(),
        }
    }
}

/// Which point of an estimate the scheduler books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationPolicy {
    #[default]
    Minimum,
    Midpoint,
}

/// Party-size scaling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyScaling {
    /// Party size at which no scaling applies
    #[serde(default = "default_baseline")]
    pub baseline_party_size: u32,
    /// Growth factor applied to ln(1 + extra people)
    #[serde(default = "default_growth")]
    pub growth: f64,
    /// Upper bound for the multiplier
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: f64,
}

fn default_baseline() -> u32 {
    2
}
fn default_growth() -> f64 {
    0.15
}
fn default_max_multiplier() -> f64 {
    1.5
}

impl Default for PartyScaling {
    fn default() -> Self {
        Self {
            baseline_party_size: default_baseline(),
            growth: default_growth(),
            max_multiplier: default_max_multiplier(),
        }
    }
}

impl PartyScaling {
    /// Multiplier for a party size. Never below 1.0, never decreasing.
    pub fn multiplier(&self, party_size: u32) -> f64 {
        let extra = party_size.saturating_sub(self.baseline_party_size) as f64;
        let growth = if self.growth.is_finite() { self.growth.max(0.0) } else { 0.0 };
        let cap = if self.max_multiplier.is_finite() {
            self.max_multiplier.max(1.0)
        } else {
            1.0
        };
        (1.0 + growth * extra.ln_1p()).min(cap)
    }
}

/// Maps (category, party size) to a duration estimate.
#[derive(Debug, Clone, Default)]
pub struct DurationEstimator {
    scaling: PartyScaling,
}

impl DurationEstimator {
    /// Create an estimator with default party scaling
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom party scaling
    pub fn with_scaling(scaling: PartyScaling) -> Self {
        Self { scaling }
    }

    pub fn scaling(&self) -> &PartyScaling {
        &self.scaling
    }

    /// Estimate how long an activity takes for a party.
    pub fn estimate(&self, category: ActivityCategory, party_size: u32) -> DurationEstimate {
        let (min, max, description) = base_range(category);
        let multiplier = self.scaling.multiplier(party_size);

        let minimum_minutes = scale(min, multiplier);
        let maximum_minutes = scale(max, multiplier).max(minimum_minutes);

        DurationEstimate {
            minimum_minutes,
            maximum_minutes,
            description: description.to_string(),
        }
    }
}

fn scale(minutes: i64, multiplier: f64) -> i64 {
    ((minutes as f64 * multiplier).round() as i64).max(1)
}

/// Base (min, max, description) per category.
fn base_range(category: ActivityCategory) -> (i64, i64, &'static str) {
    match category {
        ActivityCategory::Sightseeing => (60, 120, "Sightseeing and landmark visits"),
        ActivityCategory::Museum => (90, 180, "Museum or gallery visit"),
        ActivityCategory::Outdoor => (120, 240, "Outdoor activity or park visit"),
        ActivityCategory::Adventure => (150, 300, "Adventure or sports outing"),
        ActivityCategory::Food => (60, 120, "Meal or food experience"),
        ActivityCategory::Shopping => (60, 150, "Shopping"),
        ActivityCategory::Nightlife => (120, 240, "Evening entertainment"),
        ActivityCategory::Wellness => (60, 120, "Spa or wellness session"),
        ActivityCategory::Cultural => (90, 150, "Cultural experience"),
        ActivityCategory::Generic => (60, 120, "General activity"),
    }
}
