use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::selection::CandidateCategory;

/// How much of the selection flow runs without the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AutomationLevel {
    /// User picks everything
    #[default]
    Manual = 1,
    /// Best pick is recommended but held for confirmation
    Assisted = 2,
    /// Best pick is applied; a timeout may auto-advance
    Smart = 3,
    /// Picks are applied and booked without a gate
    Full = 4,
}

/// Gating behaviour of one automation level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCharacteristics {
    pub auto_select: bool,
    pub require_confirmation: bool,
    pub auto_book: bool,
    /// Auto-advance timeout in milliseconds
    pub timeout_ms: Option<u64>,
    pub batch_operations: bool,
    /// How many options are surfaced per step
    pub max_options: usize,
    pub confirm_before_checkout: bool,
}

impl AutomationLevel {
    pub const ALL: [AutomationLevel; 4] = [
        AutomationLevel::Manual,
        AutomationLevel::Assisted,
        AutomationLevel::Smart,
        AutomationLevel::Full,
    ];

    pub fn characteristics(&self) -> LevelCharacteristics {
        match self {
            AutomationLevel::Manual => LevelCharacteristics {
                auto_select: false,
                require_confirmation: true,
                auto_book: false,
                timeout_ms: None,
                batch_operations: false,
                max_options: 5,
                confirm_before_checkout: true,
            },
            AutomationLevel::Assisted => LevelCharacteristics {
                auto_select: true,
                require_confirmation: true,
                auto_book: false,
                timeout_ms: None,
                batch_operations: false,
                max_options: 5,
                confirm_before_checkout: true,
            },
            AutomationLevel::Smart => LevelCharacteristics {
                auto_select: true,
                require_confirmation: false,
                auto_book: false,
                timeout_ms: Some(30_000),
                batch_operations: true,
                max_options: 1,
                confirm_before_checkout: true,
            },
            AutomationLevel::Full => LevelCharacteristics {
                auto_select: true,
                require_confirmation: false,
                auto_book: true,
                timeout_ms: Some(10_000),
                batch_operations: true,
                max_options: 1,
                confirm_before_checkout: false,
            },
        }
    }

    /// Number of candidates applied without asking. Zero below `Smart`;
    /// assisted picks are only recommendations.
    pub fn auto_select_count(&self, category: CandidateCategory) -> usize {
        match (self, category) {
            (AutomationLevel::Manual | AutomationLevel::Assisted, _) => 0,
            (_, CandidateCategory::Activity) => 3,
            _ => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AutomationLevel::Manual => "manual",
            AutomationLevel::Assisted => "assisted",
            AutomationLevel::Smart => "smart",
            AutomationLevel::Full => "full",
        }
    }
}

impl TryFrom<u8> for AutomationLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AutomationLevel::Manual),
            2 => Ok(AutomationLevel::Assisted),
            3 => Ok(AutomationLevel::Smart),
            4 => Ok(AutomationLevel::Full),
            other => Err(ValidationError::InvalidAutomationLevel(other)),
        }
    }
}

impl From<AutomationLevel> for u8 {
    fn from(level: AutomationLevel) -> Self {
        level as u8
    }
}

impl fmt::Display for AutomationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", *self as u8, self.as_str())
    }
}

impl FromStr for AutomationLevel {
    type Err = ValidationError;

    /// Accepts `1`-`4` or a level name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Ok(n) = s.parse::<u8>() {
            return AutomationLevel::try_from(n);
        }
        AutomationLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "automation_level".to_string(),
                message: format!("expected 1-4 or a level name, got '{s}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_u8() {
        assert_eq!(AutomationLevel::try_from(3), Ok(AutomationLevel::Smart));
        assert_eq!(
            AutomationLevel::try_from(0),
            Err(ValidationError::InvalidAutomationLevel(0))
        );
        assert_eq!(
            AutomationLevel::try_from(5),
            Err(ValidationError::InvalidAutomationLevel(5))
        );
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("full".parse::<AutomationLevel>(), Ok(AutomationLevel::Full));
        assert_eq!("2".parse::<AutomationLevel>(), Ok(AutomationLevel::Assisted));
        assert!("9".parse::<AutomationLevel>().is_err());
        assert!("lucky".parse::<AutomationLevel>().is_err());
    }

    #[test]
    fn test_characteristics_table() {
        let manual = AutomationLevel::Manual.characteristics();
        assert!(!manual.auto_select && manual.require_confirmation);
        assert_eq!(manual.max_options, 5);

        let smart = AutomationLevel::Smart.characteristics();
        assert_eq!(smart.timeout_ms, Some(30_000));
        assert!(smart.confirm_before_checkout && !smart.auto_book);

        let full = AutomationLevel::Full.characteristics();
        assert_eq!(full.timeout_ms, Some(10_000));
        assert!(full.auto_book && !full.confirm_before_checkout);
    }

    #[test]
    fn test_auto_select_count() {
        assert_eq!(AutomationLevel::Assisted.auto_select_count(CandidateCategory::Activity), 0);
        assert_eq!(AutomationLevel::Smart.auto_select_count(CandidateCategory::Flight), 1);
        assert_eq!(AutomationLevel::Full.auto_select_count(CandidateCategory::Activity), 3);
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&AutomationLevel::Smart).unwrap();
        assert_eq!(json, "3");
        assert!(serde_json::from_str::<AutomationLevel>("7").is_err());
    }
}
