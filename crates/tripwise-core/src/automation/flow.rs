//! Per-step selection state machine.
//!
//! The flow owns no clock. When a level arms a timeout, the caller runs the
//! timer and reports back with `timeout_elapsed(token)`. Any user
//! interaction bumps the token, so a timer that fires late is ignored.
//!
//! ## State Transitions
//!
//! ```text
//! Searching -> CandidatesReady -> (AutoSelected | AwaitingConfirmation)
//!           -> Confirmed -> (AutoAdvanced | TimedOut)
//! ```
//!
//! Levels without a per-step confirmation gate (`Smart`, `Full`) let
//! `advance()` go straight from `AutoSelected` to `AutoAdvanced`. An armed timeout moves `AutoSelected` to `TimedOut`.

use serde::{Deserialize, Serialize};

use super::level::AutomationLevel;
use crate::selection::{
    Candidate, CandidateCategory, PackageConfig, ScoredCandidate, SelectionScorer, WeightWarning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    Searching,
    CandidatesReady,
    AutoSelected,
    AwaitingConfirmation,
    Confirmed,
    AutoAdvanced,
    TimedOut,
}

impl FlowState {
    /// True once the step needs nothing more from anyone.
    pub fn is_settled(&self) -> bool {
        matches!(self, FlowState::AutoAdvanced | FlowState::TimedOut)
    }
}

/// Timeout the caller should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTimeout {
    pub token: u64,
    pub timeout_ms: u64,
}

/// Every transition produces a FlowEvent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FlowEvent {
    CandidatesReady {
        step: CandidateCategory,
        count: usize,
    },
    AutoSelected {
        step: CandidateCategory,
        selected: Vec<String>,
        timeout: Option<PendingTimeout>,
    },
    AwaitingConfirmation {
        step: CandidateCategory,
        recommended: Option<String>,
    },
    /// User touched the step; any pending timeout is void.
    InteractionRecorded {
        step: CandidateCategory,
        cancelled_token: Option<u64>,
    },
    Confirmed {
        step: CandidateCategory,
        selected: Vec<String>,
    },
    AutoAdvanced {
        step: CandidateCategory,
    },
    TimedOut {
        step: CandidateCategory,
        token: u64,
    },
}

/// Selection state machine for one step (flight, hotel or activity).
#[derive(Debug, Clone)]
pub struct SelectionFlow {
    level: AutomationLevel,
    step: CandidateCategory,
    scorer: SelectionScorer,
    state: FlowState,
    ranked: Vec<ScoredCandidate>,
    selected: Vec<ScoredCandidate>,
    recommendation: Option<ScoredCandidate>,
    timeout_token: u64,
    timeout_armed: bool,
}

impl SelectionFlow {
    /// Create a flow in `Searching`, scoring with the package's weights for
    /// this step.
    pub fn new(level: AutomationLevel, package: &PackageConfig, step: CandidateCategory) -> Self {
        Self {
            level,
            step,
            scorer: SelectionScorer::new(package.weights_for(step)),
            state: FlowState::Searching,
            ranked: Vec::new(),
            selected: Vec::new(),
            recommendation: None,
            timeout_token: 0,
            timeout_armed: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn level(&self) -> AutomationLevel {
        self.level
    }

    pub fn step(&self) -> CandidateCategory {
        self.step
    }

    /// Ranked options shown to the user, capped per level.
    pub fn options(&self) -> &[ScoredCandidate] {
        let cap = self
            .level
            .characteristics()
            .max_options
            .max(self.level.auto_select_count(self.step));
        &self.ranked[..self.ranked.len().min(cap)]
    }

    /// Full ranking of the step's candidates
    pub fn ranked(&self) -> &[ScoredCandidate] {
        &self.ranked
    }

    /// Current pick (auto-selected or chosen by the user).
    pub fn selected(&self) -> &[ScoredCandidate] {
        &self.selected
    }

    pub fn recommendation(&self) -> Option<&ScoredCandidate> {
        self.recommendation.as_ref()
    }

    pub fn weight_warning(&self) -> Option<&WeightWarning> {
        self.scorer.warning()
    }

    pub fn pending_timeout(&self) -> Option<PendingTimeout> {
        if !self.timeout_armed {
            return None;
        }
        self.level
            .characteristics()
            .timeout_ms
            .map(|timeout_ms| PendingTimeout {
                token: self.timeout_token,
                timeout_ms,
            })
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Search results arrived. Candidates from other steps are ignored.
    pub fn receive(&mut self, candidates: &[Candidate]) -> Option<FlowEvent> {
        if self.state != FlowState::Searching {
            return None;
        }

        let relevant: Vec<Candidate> = candidates
            .iter()
            .filter(|c| c.category == self.step)
            .cloned()
            .collect();
        if relevant.len() != candidates.len() {
            tracing::debug!(
                step = %self.step,
                dropped = candidates.len() - relevant.len(),
                "ignored candidates from other steps"
            );
        }

        self.ranked = self.scorer.rank(&relevant);
        self.state = FlowState::CandidatesReady;
        Some(FlowEvent::CandidatesReady {
            step: self.step,
            count: self.ranked.len(),
        })
    }

    /// Apply the level's policy to the ranked candidates.
    pub fn resolve(&mut self) -> Option<FlowEvent> {
        if self.state != FlowState::CandidatesReady {
            return None;
        }

        let auto_count = self.level.auto_select_count(self.step);
        if auto_count > 0 && !self.ranked.is_empty() {
            self.selected = self.ranked.iter().take(auto_count).cloned().collect();
            self.recommendation = self.selected.first().cloned();
            self.state = FlowState::AutoSelected;
            self.timeout_armed = self.level.characteristics().timeout_ms.is_some();
            if self.timeout_armed {
                self.timeout_token += 1;
            }
            tracing::debug!(step = %self.step, level = %self.level, "auto-selected");
            return Some(FlowEvent::AutoSelected {
                step: self.step,
                selected: self.selected_ids(),
                timeout: self.pending_timeout(),
            });
        }

        if self.level.characteristics().auto_select {
            self.recommendation = self.ranked.first().cloned();
        }
        self.state = FlowState::AwaitingConfirmation;
        Some(FlowEvent::AwaitingConfirmation {
            step: self.step,
            recommended: self.recommendation.as_ref().map(|r| r.candidate.id.clone()),
        })
    }

    /// The user interacted with the step. Cancels any pending timeout and
    /// holds the step for confirmation.
    pub fn record_interaction(&mut self) -> Option<FlowEvent> {
        if !matches!(
            self.state,
            FlowState::AutoSelected | FlowState::AwaitingConfirmation
        ) {
            return None;
        }

        let cancelled_token = self.disarm_timeout();
        self.state = FlowState::AwaitingConfirmation;
        Some(FlowEvent::InteractionRecorded {
            step: self.step,
            cancelled_token,
        })
    }

    /// User picks a candidate by id, replacing the current selection.
    pub fn choose(&mut self, id: &str) -> Option<FlowEvent> {
        let choice = self.ranked.iter().find(|s| s.candidate.id == id)?.clone();
        let event = self.record_interaction()?;
        self.selected = vec![choice];
        Some(event)
    }

    /// Confirm the current selection, or the recommendation if nothing is
    /// selected yet.
    pub fn confirm(&mut self) -> Option<FlowEvent> {
        if !matches!(
            self.state,
            FlowState::AutoSelected | FlowState::AwaitingConfirmation
        ) {
            return None;
        }
        if self.selected.is_empty() {
            self.selected = self.recommendation.iter().cloned().collect();
        }
        if self.selected.is_empty() {
            return None;
        }

        self.disarm_timeout();
        self.state = FlowState::Confirmed;
        Some(FlowEvent::Confirmed {
            step: self.step,
            selected: self.selected_ids(),
        })
    }

    /// Move on to the next step. Allowed after confirmation, or straight
    /// from `AutoSelected` when the level needs no confirmation gate.
    pub fn advance(&mut self) -> Option<FlowEvent> {
        let ungated = self.state == FlowState::AutoSelected
            && !self.level.characteristics().require_confirmation;
        if self.state != FlowState::Confirmed && !ungated {
            return None;
        }

        self.disarm_timeout();
        self.state = FlowState::AutoAdvanced;
        Some(FlowEvent::AutoAdvanced { step: self.step })
    }

    /// The caller's timer fired. Stale tokens are ignored.
    pub fn timeout_elapsed(&mut self, token: u64) -> Option<FlowEvent> {
        if !self.timeout_armed || token != self.timeout_token || self.state != FlowState::AutoSelected
        {
            tracing::debug!(token, current = self.timeout_token, "ignored stale timeout");
            return None;
        }

        self.timeout_armed = false;
        self.state = FlowState::TimedOut;
        Some(FlowEvent::TimedOut {
            step: self.step,
            token,
        })
    }

    fn disarm_timeout(&mut self) -> Option<u64> {
        if !self.timeout_armed {
            return None;
        }
        let cancelled = self.timeout_token;
        self.timeout_armed = false;
        self.timeout_token += 1;
        Some(cancelled)
    }

    fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().map(|s| s.candidate.id.clone()).collect()
    }
}

/// One-shot result of running a step up to its first decision point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    pub level: AutomationLevel,
    pub step: CandidateCategory,
    pub state: FlowState,
    pub options: Vec<ScoredCandidate>,
    pub recommendation: Option<ScoredCandidate>,
    pub auto_selected: Vec<ScoredCandidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_warning: Option<WeightWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<PendingTimeout>,
    pub requires_confirmation: bool,
    pub auto_book: bool,
}

/// Score a step's candidates and apply the level's policy.
pub fn evaluate_step(
    level: AutomationLevel,
    package: &PackageConfig,
    step: CandidateCategory,
    candidates: &[Candidate],
) -> SelectionOutcome {
    let mut flow = SelectionFlow::new(level, package, step);
    flow.receive(candidates);
    flow.resolve();

    let characteristics = level.characteristics();
    SelectionOutcome {
        level,
        step,
        state: flow.state(),
        options: flow.options().to_vec(),
        recommendation: flow.recommendation().cloned(),
        auto_selected: flow.selected().to_vec(),
        weight_warning: flow.weight_warning().cloned(),
        timeout: flow.pending_timeout(),
        requires_confirmation: characteristics.require_confirmation,
        auto_book: characteristics.auto_book,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Package, ScoringWeights};

    fn flights() -> Vec<Candidate> {
        vec![
            Candidate::new("f-expensive", CandidateCategory::Flight, 640.0, 4.6).with_signals(0.9, 0.2),
            Candidate::new("f-cheap", CandidateCategory::Flight, 210.0, 3.9).with_signals(0.4, 0.1),
            Candidate::new("f-mid", CandidateCategory::Flight, 380.0, 4.2).with_signals(0.7, 0.1),
        ]
    }

    fn activities(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| {
                Candidate::new(format!("a{i}"), CandidateCategory::Activity, 20.0 + i as f64, 4.0)
            })
            .collect()
    }

    fn cost() -> PackageConfig {
        PackageConfig::preset(Package::CostOptimized)
    }

    fn ready(level: AutomationLevel, step: CandidateCategory, candidates: &[Candidate]) -> SelectionFlow {
        let mut flow = SelectionFlow::new(level, &cost(), step);
        flow.receive(candidates);
        flow.resolve();
        flow
    }

    #[test]
    fn test_manual_surfaces_options_without_pick() {
        let flow = ready(AutomationLevel::Manual, CandidateCategory::Flight, &flights());
        assert_eq!(flow.state(), FlowState::AwaitingConfirmation);
        assert_eq!(flow.options().len(), 3);
        assert!(flow.recommendation().is_none());
        assert!(flow.selected().is_empty());
        assert!(flow.pending_timeout().is_none());
    }

    #[test]
    fn test_manual_caps_options() {
        let flow = ready(AutomationLevel::Manual, CandidateCategory::Activity, &activities(8));
        assert_eq!(flow.options().len(), 5);
        assert_eq!(flow.ranked().len(), 8);
    }

    #[test]
    fn test_assisted_holds_recommendation() {
        let mut flow = ready(AutomationLevel::Assisted, CandidateCategory::Flight, &flights());
        assert_eq!(flow.state(), FlowState::AwaitingConfirmation);
        assert_eq!(flow.recommendation().unwrap().candidate.id, "f-cheap");
        assert!(flow.selected().is_empty());

        let event = flow.confirm().unwrap();
        assert_eq!(
            event,
            FlowEvent::Confirmed {
                step: CandidateCategory::Flight,
                selected: vec!["f-cheap".to_string()],
            }
        );
        assert!(flow.advance().is_some());
        assert_eq!(flow.state(), FlowState::AutoAdvanced);
    }

    #[test]
    fn test_smart_auto_selects_and_arms_timeout() {
        let mut flow = ready(AutomationLevel::Smart, CandidateCategory::Flight, &flights());
        assert_eq!(flow.state(), FlowState::AutoSelected);
        assert_eq!(flow.selected().len(), 1);
        assert_eq!(flow.options().len(), 1);

        let timeout = flow.pending_timeout().unwrap();
        assert_eq!(timeout.timeout_ms, 30_000);

        let event = flow.timeout_elapsed(timeout.token).unwrap();
        assert!(matches!(event, FlowEvent::TimedOut { .. }));
        assert!(flow.state().is_settled());
    }

    #[test]
    fn test_smart_advances_without_confirmation() {
        let mut flow = ready(AutomationLevel::Smart, CandidateCategory::Flight, &flights());
        let token = flow.pending_timeout().unwrap().token;

        let event = flow.advance().unwrap();
        assert_eq!(event, FlowEvent::AutoAdvanced { step: CandidateCategory::Flight });
        assert_eq!(flow.state(), FlowState::AutoAdvanced);
        assert!(flow.pending_timeout().is_none());
        // The timer from the auto-selection no longer applies.
        assert!(flow.timeout_elapsed(token).is_none());
    }

    #[test]
    fn test_gated_levels_need_confirmation_to_advance() {
        let mut assisted = ready(AutomationLevel::Assisted, CandidateCategory::Flight, &flights());
        assert!(assisted.advance().is_none());
        assisted.confirm().unwrap();
        assert!(assisted.advance().is_some());
    }

    #[test]
    fn test_interaction_cancels_timeout() {
        let mut flow = ready(AutomationLevel::Smart, CandidateCategory::Hotel, &[
            Candidate::new("h1", CandidateCategory::Hotel, 180.0, 4.4),
            Candidate::new("h2", CandidateCategory::Hotel, 120.0, 4.0),
        ]);
        let stale = flow.pending_timeout().unwrap().token;

        let event = flow.record_interaction().unwrap();
        assert_eq!(
            event,
            FlowEvent::InteractionRecorded {
                step: CandidateCategory::Hotel,
                cancelled_token: Some(stale),
            }
        );
        assert_eq!(flow.state(), FlowState::AwaitingConfirmation);
        assert!(flow.pending_timeout().is_none());
        assert!(flow.timeout_elapsed(stale).is_none());
        assert_eq!(flow.state(), FlowState::AwaitingConfirmation);
    }

    #[test]
    fn test_choose_replaces_selection() {
        let mut flow = ready(AutomationLevel::Smart, CandidateCategory::Flight, &flights());
        assert!(flow.choose("missing").is_none());
        assert!(flow.choose("f-expensive").is_some());
        assert_eq!(flow.selected()[0].candidate.id, "f-expensive");

        flow.confirm().unwrap();
        assert_eq!(flow.state(), FlowState::Confirmed);
    }

    #[test]
    fn test_full_advances_without_gate() {
        let mut flow = ready(AutomationLevel::Full, CandidateCategory::Flight, &flights());
        assert_eq!(flow.pending_timeout().unwrap().timeout_ms, 10_000);
        let token = flow.pending_timeout().unwrap().token;

        assert_eq!(
            flow.advance(),
            Some(FlowEvent::AutoAdvanced {
                step: CandidateCategory::Flight
            })
        );
        assert!(flow.timeout_elapsed(token).is_none());
        assert_eq!(flow.state(), FlowState::AutoAdvanced);
    }

    #[test]
    fn test_activities_auto_select_three() {
        let flow = ready(AutomationLevel::Smart, CandidateCategory::Activity, &activities(6));
        let ids: Vec<&str> = flow.selected().iter().map(|s| s.candidate.id.as_str()).collect();
        assert_eq!(ids, vec!["a0", "a1", "a2"]);
        assert_eq!(flow.options().len(), 3);
    }

    #[test]
    fn test_empty_results_wait_for_user() {
        let mut flow = ready(AutomationLevel::Full, CandidateCategory::Hotel, &[]);
        assert_eq!(flow.state(), FlowState::AwaitingConfirmation);
        assert!(flow.confirm().is_none());
    }

    #[test]
    fn test_out_of_order_transitions_are_ignored() {
        let mut flow = SelectionFlow::new(AutomationLevel::Smart, &cost(), CandidateCategory::Flight);
        assert!(flow.resolve().is_none());
        assert!(flow.confirm().is_none());
        assert!(flow.timeout_elapsed(0).is_none());
        assert!(flow.receive(&flights()).is_some());
        assert!(flow.receive(&flights()).is_none());
    }

    #[test]
    fn test_other_steps_are_filtered() {
        let mut mixed = flights();
        mixed.extend(activities(2));
        let flow = ready(AutomationLevel::Manual, CandidateCategory::Flight, &mixed);
        assert_eq!(flow.ranked().len(), 3);
    }

    #[test]
    fn test_evaluate_step_outcome() {
        let package = PackageConfig::custom(ScoringWeights::new(3.0, 1.0, 0.0, 0.0));
        let outcome = evaluate_step(
            AutomationLevel::Assisted,
            &package,
            CandidateCategory::Flight,
            &flights(),
        );
        assert_eq!(outcome.state, FlowState::AwaitingConfirmation);
        assert_eq!(outcome.recommendation.unwrap().candidate.id, "f-cheap");
        assert!(outcome.auto_selected.is_empty());
        assert!(outcome.weight_warning.is_some());
        assert!(outcome.requires_confirmation);
        assert!(!outcome.auto_book);
    }
}
