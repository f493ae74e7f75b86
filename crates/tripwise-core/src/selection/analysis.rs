//! Summary of a search result set: counts, price and rating spread, and a
//! confidence score for how much the selection can be trusted.

use serde::{Deserialize, Serialize};

use super::candidate::{Candidate, CandidateCategory};

const BASE_CONFIDENCE: f64 = 0.5;
const PER_CATEGORY_BONUS: f64 = 0.1;
const DEPTH_BONUS: f64 = 0.05;
const MAX_CONFIDENCE: f64 = 0.9;

/// Min/max/average of a set of values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl ValueRange {
    /// Range over the finite values; `None` if there are none.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values.into_iter().filter(|v| v.is_finite()) {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        (count > 0).then(|| ValueRange {
            min,
            max,
            avg: sum / count as f64,
        })
    }
}

/// Per-category summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: CandidateCategory,
    pub count: usize,
    pub price: Option<ValueRange>,
    pub rating: Option<ValueRange>,
}

impl CategorySummary {
    fn of(category: CandidateCategory, candidates: &[Candidate]) -> Self {
        let members: Vec<&Candidate> = candidates.iter().filter(|c| c.category == category).collect();
        Self {
            category,
            count: members.len(),
            price: ValueRange::from_values(members.iter().map(|c| c.price)),
            rating: ValueRange::from_values(members.iter().map(|c| c.rating)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchAnalysis {
    pub flights: CategorySummary,
    pub hotels: CategorySummary,
    pub activities: CategorySummary,
    /// 0.5 to 0.9
    pub confidence: f64,
}

impl SearchAnalysis {
    pub fn from_candidates(candidates: &[Candidate]) -> Self {
        let flights = CategorySummary::of(CandidateCategory::Flight, candidates);
        let hotels = CategorySummary::of(CandidateCategory::Hotel, candidates);
        let activities = CategorySummary::of(CandidateCategory::Activity, candidates);

        let mut confidence = BASE_CONFIDENCE;
        for summary in [&flights, &hotels, &activities] {
            if summary.count > 0 {
                confidence += PER_CATEGORY_BONUS;
            }
        }
        if flights.count > 3 {
            confidence += DEPTH_BONUS;
        }
        if hotels.count > 3 {
            confidence += DEPTH_BONUS;
        }
        if activities.count > 5 {
            confidence += DEPTH_BONUS;
        }

        Self {
            flights,
            hotels,
            activities,
            confidence: confidence.min(MAX_CONFIDENCE),
        }
    }

    pub fn summary(&self, category: CandidateCategory) -> &CategorySummary {
        match category {
            CandidateCategory::Flight => &self.flights,
            CandidateCategory::Hotel => &self.hotels,
            CandidateCategory::Activity => &self.activities,
        }
    }

    pub fn total_candidates(&self) -> usize {
        self.flights.count + self.hotels.count + self.activities.count
    }
}
