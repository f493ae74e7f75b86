//! Activity categories.
//!
//! The category set is closed so that every table keyed on it is an
//! exhaustive `match`. Search providers hand us free-form strings, so the
//! conversion from text is lenient: synonyms are folded in and anything
//! unrecognised becomes [`ActivityCategory::Generic`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of activity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ActivityCategory {
    Sightseeing,
    Museum,
    Outdoor,
    Adventure,
    Food,
    Shopping,
    Nightlife,
    Wellness,
    Cultural,
    #[default]
    Generic,
}

impl ActivityCategory {
    /// All categories, in table order.
    pub const ALL: [ActivityCategory; 10] = [
        ActivityCategory::Sightseeing,
        ActivityCategory::Museum,
        ActivityCategory::Outdoor,
        ActivityCategory::Adventure,
        ActivityCategory::Food,
        ActivityCategory::Shopping,
        ActivityCategory::Nightlife,
        ActivityCategory::Wellness,
        ActivityCategory::Cultural,
        ActivityCategory::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Sightseeing => "sightseeing",
            ActivityCategory::Museum => "museum",
            ActivityCategory::Outdoor => "outdoor",
            ActivityCategory::Adventure => "adventure",
            ActivityCategory::Food => "food",
            ActivityCategory::Shopping => "shopping",
            ActivityCategory::Nightlife => "nightlife",
            ActivityCategory::Wellness => "wellness",
            ActivityCategory::Cultural => "cultural",
            ActivityCategory::Generic => "generic",
        }
    }

    /// Map a provider label to a category, never failing.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Labels that match nothing fall back to `Generic`.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "sightseeing" | "tour" | "tours" | "landmark" | "landmarks" | "attraction" => {
                ActivityCategory::Sightseeing
            }
            "museum" | "museums" | "gallery" | "art" | "history" => ActivityCategory::Museum,
            "outdoor" | "outdoors" | "nature" | "park" | "parks" | "hiking" | "beach" => {
                ActivityCategory::Outdoor
            }
            "adventure" | "sports" | "extreme" => ActivityCategory::Adventure,
            "food" | "dining" | "restaurant" | "cuisine" | "food_tour" => ActivityCategory::Food,
            "shopping" | "market" | "markets" => ActivityCategory::Shopping,
            "nightlife" | "entertainment" | "bar" | "bars" | "show" | "club" => {
                ActivityCategory::Nightlife
            }
            "wellness" | "spa" | "relaxation" | "yoga" => ActivityCategory::Wellness,
            "cultural" | "culture" | "heritage" | "religious" => ActivityCategory::Cultural,
            _ => ActivityCategory::Generic,
        }
    }
}

impl From<&str> for ActivityCategory {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<String> for ActivityCategory {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
