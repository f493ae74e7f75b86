use serde::{Deserialize, Serialize};
use std::fmt;

/// Search category a candidate competes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateCategory {
    Flight,
    Hotel,
    Activity,
}

impl CandidateCategory {
    pub const ALL: [CandidateCategory; 3] = [
        CandidateCategory::Flight,
        CandidateCategory::Hotel,
        CandidateCategory::Activity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateCategory::Flight => "flight",
            CandidateCategory::Hotel => "hotel",
            CandidateCategory::Activity => "activity",
        }
    }
}

impl fmt::Display for CandidateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CandidateCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flight" | "flights" => Ok(CandidateCategory::Flight),
            "hotel" | "hotels" => Ok(CandidateCategory::Hotel),
            "activity" | "activities" => Ok(CandidateCategory::Activity),
            other => Err(format!("unknown candidate category: {other}")),
        }
    }
}

/// One competing option returned by a search collaborator.
///
/// `convenience` and `uniqueness` are opaque 0-1 signals computed upstream
/// (layover count, centrality, review text); the scorer only clamps them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price: f64,
    /// Rating on a 0-5 scale
    pub rating: f64,
    #[serde(default)]
    pub convenience: f64,
    #[serde(default)]
    pub uniqueness: f64,
    pub category: CandidateCategory,
}

impl Candidate {
    pub fn new(id: impl Into<String>, category: CandidateCategory, price: f64, rating: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            price,
            rating,
            convenience: 0.0,
            uniqueness: 0.0,
            category,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_signals(mut self, convenience: f64, uniqueness: f64) -> Self {
        self.convenience = convenience;
        self.uniqueness = uniqueness;
        self
    }

    /// Name for display, falling back to the id.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("Hotels".parse::<CandidateCategory>(), Ok(CandidateCategory::Hotel));
        assert_eq!(" flight ".parse::<CandidateCategory>(), Ok(CandidateCategory::Flight));
        assert!("cruise".parse::<CandidateCategory>().is_err());
    }

    #[test]
    fn test_signals_default_to_zero() {
        let json = r#"{"id": "f1", "price": 320.0, "rating": 4.1, "category": "flight"}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.convenience, 0.0);
        assert_eq!(candidate.uniqueness, 0.0);
        assert_eq!(candidate.label(), "f1");
    }
}
