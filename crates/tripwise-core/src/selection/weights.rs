use serde::{Deserialize, Serialize};
use std::fmt;

/// Allowed distance of the weight sum from 1.0 before a warning is raised.
pub const SUM_TOLERANCE: f64 = 0.05;

/// Weights for each selection objective
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for price (higher = prefer cheaper options)
    pub price: f64,
    /// Weight for rating
    pub rating: f64,
    /// Weight for convenience (short layovers, central location)
    pub convenience: f64,
    /// Weight for uniqueness
    pub uniqueness: f64,
}

impl ScoringWeights {
    pub const fn new(price: f64, rating: f64, convenience: f64, uniqueness: f64) -> Self {
        Self {
            price,
            rating,
            convenience,
            uniqueness,
        }
    }

    /// Equal weight on every objective
    pub const fn balanced() -> Self {
        Self::new(0.25, 0.25, 0.25, 0.25)
    }

    pub fn sum(&self) -> f64 {
        self.price + self.rating + self.convenience + self.uniqueness
    }

    fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("price", self.price),
            ("rating", self.rating),
            ("convenience", self.convenience),
            ("uniqueness", self.uniqueness),
        ]
    }

    /// Normalize weights to sum to 1.0.
    ///
    /// Negative and non-finite components count as 0. An all-zero vector
    /// falls back to balanced. The warning reports what was wrong with the
    /// input; the returned weights are always usable.
    pub fn normalized(&self) -> (ScoringWeights, Option<WeightWarning>) {
        let out_of_range: Vec<String> = self
            .components()
            .into_iter()
            .filter(|(_, w)| !w.is_finite() || *w < 0.0 || *w > 1.0)
            .map(|(name, _)| name.to_string())
            .collect();

        let clamp = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let cleaned = ScoringWeights::new(
            clamp(self.price),
            clamp(self.rating),
            clamp(self.convenience),
            clamp(self.uniqueness),
        );
        let sum = cleaned.sum();

        let normalized = if sum > 0.0 {
            ScoringWeights::new(
                cleaned.price / sum,
                cleaned.rating / sum,
                cleaned.convenience / sum,
                cleaned.uniqueness / sum,
            )
        } else {
            ScoringWeights::balanced()
        };

        let sum_deviates = (sum - 1.0).abs() > SUM_TOLERANCE;
        let warning = if !out_of_range.is_empty() || sum_deviates {
            Some(WeightWarning {
                original_sum: sum,
                out_of_range,
                fell_back_to_balanced: sum <= 0.0,
            })
        } else {
            None
        };

        (normalized, warning)
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Non-fatal report that a weight vector needed fixing up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightWarning {
    /// Sum after clamping invalid components to 0
    pub original_sum: f64,
    /// Components that were negative, above 1 or not finite
    pub out_of_range: Vec<String>,
    pub fell_back_to_balanced: bool,
}

impl fmt::Display for WeightWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fell_back_to_balanced {
            return write!(f, "weights sum to zero; using balanced weights");
        }
        write!(f, "weights summed to {:.3} and were normalized", self.original_sum)?;
        if !self.out_of_range.is_empty() {
            write!(f, " (out of range: {})", self.out_of_range.join(", "))?;
        }
        Ok(())
    }
}
