//! Itinerary scheduling.
//!
//! This module provides:
//! - Itinerary items with optional anchors and duration overrides
//! - The day scheduler that inserts travel legs and buffers
//! - Nearest-neighbour reordering of flexible items
//! - Trip day structure (arrival, full, departure)

mod item;
mod route;
mod scheduler;
mod trip;

pub use item::{Advisory, ComputedSchedule, ItemKind, ScheduleItem};
pub use route::{optimize_order, route_distance_km};
pub use scheduler::{
    DayPlan, IntelligentScheduler, RouteStats, ScheduleAdvisory, SchedulerConfig, MAX_SPAN_MINUTES,
};
pub use trip::{plan_trip_days, DayType, TripDay};
