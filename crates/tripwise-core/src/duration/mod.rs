//! Activity duration estimation.
//!
//! - Closed [`ActivityCategory`] set with a lenient text boundary
//! - Per-category base ranges scaled by party size

mod category;
mod estimator;

pub use category::ActivityCategory;
pub use estimator::{DurationEstimate, DurationEstimator, DurationPolicy, PartyScaling};
