//! Weighted multi-objective candidate scoring.
//!
//! Each candidate gets a breakdown of four terms (price, rating,
//! convenience, uniqueness), each a 0-1 score times its weight. Price is
//! relative: it is min-max scaled within the candidate set, so the cheapest
//! option scores 1 and the most expensive 0.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::candidate::Candidate;
use super::weights::{ScoringWeights, WeightWarning};

/// Highest rating a candidate can have
pub const MAX_RATING: f64 = 5.0;

/// Individual objective term with weight and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveTerm {
    /// Term name
    pub name: String,
    /// Weight for this term (0.0 to 1.0)
    pub weight: f64,
    /// Raw score (0.0 to 1.0, higher is better)
    pub score: f64,
    /// Weighted contribution
    pub contribution: f64,
}

impl ObjectiveTerm {
    pub fn new(name: impl Into<String>, weight: f64, score: f64) -> Self {
        let weight = weight.clamp(0.0, 1.0);
        let score = score.clamp(0.0, 1.0);
        Self {
            name: name.into(),
            weight,
            score,
            contribution: weight * score,
        }
    }
}

/// Complete scoring breakdown for explainability
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub terms: Vec<ObjectiveTerm>,
    /// Total weighted score (0.0 to 1.0)
    pub total_score: f64,
}

impl ScoreBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_term(&mut self, term: ObjectiveTerm) {
        self.total_score += term.contribution;
        self.terms.push(term);
    }

    /// Get the top contributing term
    pub fn top_term(&self) -> Option<&ObjectiveTerm> {
        self.terms
            .iter()
            .max_by(|a, b| a.contribution.total_cmp(&b.contribution))
    }

    pub fn term(&self, name: &str) -> Option<&ObjectiveTerm> {
        self.terms.iter().find(|t| t.name == name)
    }
}

/// Finite price span of a candidate set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Range over the finite prices; `None` if there are none.
    pub fn of(candidates: &[Candidate]) -> Option<Self> {
        candidates
            .iter()
            .map(|c| c.price)
            .filter(|p| p.is_finite())
            .fold(None, |range, price| match range {
                None => Some(PriceRange { min: price, max: price }),
                Some(r) => Some(PriceRange {
                    min: r.min.min(price),
                    max: r.max.max(price),
                }),
            })
    }

    /// Inverted min-max score: cheapest 1, priciest 0, all-equal 1.
    pub fn score(&self, price: f64) -> f64 {
        if !price.is_finite() {
            return 0.0;
        }
        let span = self.max - self.min;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.max - price) / span).clamp(0.0, 1.0)
    }
}

/// Clamp an opaque 0-1 signal, treating garbage as 0.
fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Candidate with its score and breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    /// Position in the input list
    pub input_index: usize,
}

/// Scores and ranks candidates with a fixed, normalized weight vector.
#[derive(Debug, Clone)]
pub struct SelectionScorer {
    weights: ScoringWeights,
    warning: Option<WeightWarning>,
}

impl SelectionScorer {
    /// Create a scorer, normalizing the weights first.
    pub fn new(weights: ScoringWeights) -> Self {
        let (weights, warning) = weights.normalized();
        if let Some(warning) = &warning {
            tracing::warn!(%warning, "scoring weights adjusted");
        }
        Self { weights, warning }
    }

    /// Normalized weights in use
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// What normalization had to fix, if anything
    pub fn warning(&self) -> Option<&WeightWarning> {
        self.warning.as_ref()
    }

    /// Score one candidate against a price range.
    pub fn score(&self, candidate: &Candidate, prices: Option<PriceRange>) -> ScoreBreakdown {
        let price_score = match prices {
            Some(range) => range.score(candidate.price),
            None => 0.0,
        };
        let rating_score = if candidate.rating.is_finite() {
            candidate.rating.clamp(0.0, MAX_RATING) / MAX_RATING
        } else {
            0.0
        };

        let mut breakdown = ScoreBreakdown::new();
        breakdown.add_term(ObjectiveTerm::new("price", self.weights.price, price_score));
        breakdown.add_term(ObjectiveTerm::new("rating", self.weights.rating, rating_score));
        breakdown.add_term(ObjectiveTerm::new(
            "convenience",
            self.weights.convenience,
            unit(candidate.convenience),
        ));
        breakdown.add_term(ObjectiveTerm::new(
            "uniqueness",
            self.weights.uniqueness,
            unit(candidate.uniqueness),
        ));
        breakdown
    }

    /// Score every candidate and order best first.
    ///
    /// Ties go to the lower price, then the higher rating, then the smaller
    /// id, then the earlier input position.
    pub fn rank(&self, candidates: &[Candidate]) -> Vec<ScoredCandidate> {
        let prices = PriceRange::of(candidates);
        let mut scored: Vec<ScoredCandidate> = candidates
            .iter()
            .enumerate()
            .map(|(input_index, candidate)| {
                let breakdown = self.score(candidate, prices);
                ScoredCandidate {
                    candidate: candidate.clone(),
                    score: breakdown.total_score,
                    breakdown,
                    input_index,
                }
            })
            .collect();

        scored.sort_by(compare_ranked);
        scored
    }

    /// Best candidate, or `None` for an empty set.
    pub fn select(&self, candidates: &[Candidate]) -> Option<ScoredCandidate> {
        let best = self.rank(candidates).into_iter().next();
        if let Some(best) = &best {
            tracing::debug!(id = %best.candidate.id, score = best.score, "selected candidate");
        }
        best
    }
}

impl Default for SelectionScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::balanced())
    }
}

fn compare_ranked(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| price_key(a).total_cmp(&price_key(b)))
        .then_with(|| rating_key(b).total_cmp(&rating_key(a)))
        .then_with(|| a.candidate.id.cmp(&b.candidate.id))
        .then_with(|| a.input_index.cmp(&b.input_index))
}

fn price_key(scored: &ScoredCandidate) -> f64 {
    let price = scored.candidate.price;
    if price.is_finite() {
        price
    } else {
        f64::INFINITY
    }
}

fn rating_key(scored: &ScoredCandidate) -> f64 {
    let rating = scored.candidate.rating;
    if rating.is_finite() {
        rating
    } else {
        f64::NEG_INFINITY
    }
}
