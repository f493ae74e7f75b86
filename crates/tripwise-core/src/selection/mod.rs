//! Candidate selection.
//!
//! This module provides:
//! - Candidate records from flight, hotel and activity searches
//! - Weight vectors with normalization and warnings
//! - Packages (weight presets) and per-category preference tags
//! - The weighted scorer with explainable breakdowns
//! - Search result analysis and confidence

mod analysis;
mod candidate;
mod package;
mod scorer;
mod weights;

pub use analysis::{CategorySummary, SearchAnalysis, ValueRange};
pub use candidate::{Candidate, CandidateCategory};
pub use package::{ActivityPreference, FlightPreference, HotelPreference, Package, PackageConfig};
pub use scorer::{
    ObjectiveTerm, PriceRange, ScoreBreakdown, ScoredCandidate, SelectionScorer, MAX_RATING,
};
pub use weights::{ScoringWeights, WeightWarning, SUM_TOLERANCE};
