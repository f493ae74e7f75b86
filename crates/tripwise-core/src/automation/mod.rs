//! Automation levels and the per-step selection flow.
//!
//! Level 1 surfaces options, level 2 recommends, level 3 selects with a
//! timeout, and level 4 selects and books without asking.

mod flow;
mod level;

pub use flow::{evaluate_step, FlowEvent, FlowState, PendingTimeout, SelectionFlow, SelectionOutcome};
pub use level::{AutomationLevel, LevelCharacteristics};
