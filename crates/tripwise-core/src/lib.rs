//! # Tripwise Core Library
//!
//! This library provides the decision core of the Tripwise trip planner.
//! It turns candidate lists and itinerary items into a chosen set of options
//! and a conflict-free, time-stamped day schedule. Everything is synchronous
//! and deterministic; searching, booking and timers belong to the caller.
//! The `tripwise` CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Duration**: category-based activity duration ranges scaled by party size
//! - **Geo**: haversine distance and distance-banded travel estimates
//! - **Itinerary**: the day scheduler with anchors, travel legs and buffers
//! - **Selection**: weighted multi-objective candidate scoring
//! - **Automation**: 4-level gating of the selection flow
//! - **Storage**: TOML-based preferences
//!
//! ## Key Components
//!
//! - [`DurationEstimator`]: category and party size to a duration range
//! - [`DistanceCalculator`]: distance and travel leg between two locations
//! - [`IntelligentScheduler`]: time-stamped day plans
//! - [`SelectionScorer`]: ranks candidates under a weight vector
//! - [`SelectionFlow`]: per-step automation state machine

pub mod automation;
pub mod duration;
pub mod error;
pub mod geo;
pub mod itinerary;
pub mod selection;
pub mod storage;

pub use automation::{
    evaluate_step, AutomationLevel, FlowEvent, FlowState, LevelCharacteristics, SelectionFlow,
    SelectionOutcome,
};
pub use duration::{ActivityCategory, DurationEstimate, DurationEstimator, DurationPolicy};
pub use error::{ConfigError, CoreError, ValidationError};
pub use geo::{DistanceCalculator, GeoPoint, Location, LocationKind, TravelEstimate, TravelMethod};
pub use itinerary::{
    optimize_order, plan_trip_days, DayPlan, IntelligentScheduler, ItemKind, ScheduleItem,
    SchedulerConfig, TripDay,
};
pub use selection::{
    Candidate, CandidateCategory, Package, PackageConfig, ScoredCandidate, ScoringWeights,
    SearchAnalysis, SelectionScorer, WeightWarning,
};
pub use storage::{MemoryStore, PreferenceStore, Preferences, TomlFileStore};
