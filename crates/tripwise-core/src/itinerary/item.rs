//! Itinerary items and the times the scheduler computes for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::ActivityCategory;
use crate::geo::{Location, TravelEstimate};
use crate::selection::{Candidate, CandidateCategory};

/// Kind of itinerary item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Flight,
    Hotel,
    Activity,
    Restaurant,
    Transport,
}

/// Advisory raised while scheduling. Never fatal; the caller decides what
/// to do with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Advisory {
    /// Anchor starts before the previous item (plus travel and buffer)
    /// is finished. The anchor keeps its time.
    AnchorBeforeCursor {
        anchor: DateTime<Utc>,
        cursor: DateTime<Utc>,
    },
    /// Anchor collides with an earlier anchor and was pushed back.
    AnchorConflict {
        requested: DateTime<Utc>,
        effective: DateTime<Utc>,
        conflicts_with: String,
    },
    /// Travel to the next item used the fallback estimate.
    UncertainTravel { to: String },
    /// Item ends after the configured end of the day.
    OverrunsDay { day_end: DateTime<Utc> },
    /// Requested duration was outside the schedulable range and was clamped.
    DurationCapped {
        requested_minutes: i64,
        capped_minutes: i64,
    },
}

/// Times and gaps computed for a scheduled item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedSchedule {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Leg to the next item in input order; `None` for the last item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_to_next: Option<TravelEstimate>,
    pub buffer_after_minutes: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<Advisory>,
}

impl ComputedSchedule {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// One item of a day's itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub id: String,
    pub kind: ItemKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location: Location,
    /// Externally fixed start (flight departure, check-in). Makes the item an anchor.
    #[serde(default)]
    pub fixed_start_time: Option<DateTime<Utc>>,
    /// Known duration, bypassing the estimator.
    #[serde(default)]
    pub duration_override_minutes: Option<i64>,
    #[serde(default)]
    pub categories: Vec<ActivityCategory>,
    /// Filled in by the scheduler.
    #[serde(default)]
    pub computed: Option<ComputedSchedule>,
}

impl ScheduleItem {
    /// Create a new un-anchored item
    pub fn new(
        id: impl Into<String>,
        kind: ItemKind,
        name: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            description: String::new(),
            location,
            fixed_start_time: None,
            duration_override_minutes: None,
            categories: Vec::new(),
            computed: None,
        }
    }

    /// Create an item for a chosen candidate, with a fresh id.
    pub fn from_candidate(candidate: &Candidate, location: Location) -> Self {
        let kind = match candidate.category {
            CandidateCategory::Flight => ItemKind::Flight,
            CandidateCategory::Hotel => ItemKind::Hotel,
            CandidateCategory::Activity => ItemKind::Activity,
        };
        let name = if candidate.name.is_empty() {
            candidate.id.clone()
        } else {
            candidate.name.clone()
        };

        Self::new(uuid::Uuid::new_v4().to_string(), kind, name, location)
            .with_description(format!("Selected option {}", candidate.id))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Pin the start time.
    pub fn anchored_at(mut self, start: DateTime<Utc>) -> Self {
        self.fixed_start_time = Some(start);
        self
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_override_minutes = Some(minutes);
        self
    }

    pub fn with_categories(mut self, categories: Vec<ActivityCategory>) -> Self {
        self.categories = categories;
        self
    }

    pub fn is_anchor(&self) -> bool {
        self.fixed_start_time.is_some()
    }

    /// Category used for duration estimates.
    pub fn primary_category(&self) -> ActivityCategory {
        self.categories.first().copied().unwrap_or_default()
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.computed.as_ref().map(|c| c.start_time)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.computed.as_ref().map(|c| c.end_time)
    }
}
