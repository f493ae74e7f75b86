//! Day scheduler for itinerary items.
//!
//! Walks the items in input order with a moving cursor:
//! - Anchors (fixed start times) keep their time
//! - Everything else starts at the cursor
//! - After each item the cursor advances past its end, the travel leg to the
//!   next item, and a buffer that grows with travel time and collapses to the
//!   minimum for co-located items
//!
//! The result is re-derived from scratch on every call. Input items are
//! never mutated.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::item::{Advisory, ComputedSchedule, ScheduleItem};
use crate::duration::{DurationEstimator, DurationPolicy};
use crate::geo::{DistanceCalculator, TravelEstimate};

/// Longest single duration, travel leg or buffer the scheduler will place
/// (one week). Larger values are clamped.
pub const MAX_SPAN_MINUTES: i64 = 7 * 24 * 60;

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Smallest buffer ever inserted between items (minutes)
    #[serde(default = "default_minimum_buffer")]
    pub minimum_buffer_minutes: i64,
    /// Buffer added on top of travel time for non-adjacent items (minutes)
    #[serde(default = "default_base_buffer")]
    pub base_buffer_minutes: i64,
    /// Which point of the estimated range to book
    #[serde(default)]
    pub duration_policy: DurationPolicy,
    /// Flag items that end later than this many minutes after day start
    #[serde(default)]
    pub max_day_minutes: Option<i64>,
}

fn default_minimum_buffer() -> i64 {
    5
}
fn default_base_buffer() -> i64 {
    15
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            minimum_buffer_minutes: default_minimum_buffer(),
            base_buffer_minutes: default_base_buffer(),
            duration_policy: DurationPolicy::default(),
            max_day_minutes: None,
        }
    }
}

/// An advisory together with the item it was raised on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleAdvisory {
    pub item_id: String,
    pub advisory: Advisory,
}

/// Time breakdown of a scheduled day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteStats {
    pub total_items: usize,
    pub total_travel_minutes: i64,
    pub total_activity_minutes: i64,
    pub total_buffer_minutes: i64,
    /// Activity time / (activity + travel + buffer)
    pub efficiency_ratio: f64,
}

/// A fully scheduled day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day_start: DateTime<Utc>,
    /// Items in chronological order
    pub items: Vec<ScheduleItem>,
    pub advisories: Vec<ScheduleAdvisory>,
    /// Latest end minus earliest start; zero when empty
    pub total_duration_minutes: i64,
    pub stats: RouteStats,
}

/// Builds conflict-free day schedules.
#[derive(Debug, Clone, Default)]
pub struct IntelligentScheduler {
    config: SchedulerConfig,
    durations: DurationEstimator,
    distances: DistanceCalculator,
}

impl IntelligentScheduler {
    /// Create a new scheduler with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create with custom config and collaborators
    pub fn with_components(
        config: SchedulerConfig,
        durations: DurationEstimator,
        distances: DistanceCalculator,
    ) -> Self {
        Self {
            config,
            durations,
            distances,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedule items and return them time-stamped, in chronological order.
    pub fn schedule(
        &self,
        items: &[ScheduleItem],
        day_start: DateTime<Utc>,
        party_size: u32,
    ) -> Vec<ScheduleItem> {
        self.plan_day(items, day_start, party_size).items
    }

    /// Schedule items and return the full day plan with advisories and stats.
    pub fn plan_day(
        &self,
        items: &[ScheduleItem],
        day_start: DateTime<Utc>,
        party_size: u32,
    ) -> DayPlan {
        let day_end = self
            .config
            .max_day_minutes
            .map(|minutes| shift(day_start, minutes));

        let mut cursor = day_start;
        let mut last_anchor: Option<AnchorWindow> = None;
        let mut scheduled = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let mut advisories = Vec::new();
            let requested = self.duration_for(item, party_size);
            let minutes = requested.clamp(0, MAX_SPAN_MINUTES);
            if minutes != requested {
                advisories.push(Advisory::DurationCapped {
                    requested_minutes: requested,
                    capped_minutes: minutes,
                });
            }

            let start = match item.fixed_start_time {
                Some(fixed) => match &last_anchor {
                    Some(previous) if previous.overlaps(fixed, shift(fixed, minutes)) => {
                        advisories.push(Advisory::AnchorConflict {
                            requested: fixed,
                            effective: cursor,
                            conflicts_with: previous.id.clone(),
                        });
                        cursor
                    }
                    _ => {
                        if fixed < cursor {
                            advisories.push(Advisory::AnchorBeforeCursor {
                                anchor: fixed,
                                cursor,
                            });
                        }
                        fixed
                    }
                },
                None => cursor,
            };

            let end = shift(start, minutes);
            cursor = cursor.max(end);

            let (travel_to_next, buffer_after_minutes) = match items.get(index + 1) {
                Some(next) => {
                    let mut travel = self
                        .distances
                        .estimate_travel(&item.location, &next.location);
                    travel.duration_minutes = travel.duration_minutes.clamp(0, MAX_SPAN_MINUTES);
                    if travel.uncertain {
                        advisories.push(Advisory::UncertainTravel {
                            to: next.id.clone(),
                        });
                    }
                    let buffer = self.buffer_after(&travel);
                    cursor = shift(cursor, travel.duration_minutes + buffer);
                    (Some(travel), buffer)
                }
                None => (None, 0),
            };

            if item.is_anchor() {
                last_anchor = Some(AnchorWindow {
                    id: item.id.clone(),
                    start,
                    release: cursor,
                });
            }

            if let Some(day_end) = day_end {
                if end > day_end {
                    advisories.push(Advisory::OverrunsDay { day_end });
                }
            }

            tracing::debug!(
                item = %item.id,
                start = %start,
                end = %end,
                buffer = buffer_after_minutes,
                "scheduled itinerary item"
            );

            let mut out = item.clone();
            out.computed = Some(ComputedSchedule {
                start_time: start,
                end_time: end,
                travel_to_next,
                buffer_after_minutes,
                advisories,
            });
            scheduled.push(out);
        }

        scheduled.sort_by_key(|item| item.start_time());

        let advisories = collect_advisories(&scheduled);
        for entry in &advisories {
            tracing::warn!(item = %entry.item_id, advisory = ?entry.advisory, "schedule advisory");
        }

        DayPlan {
            day_start,
            total_duration_minutes: total_duration(&scheduled),
            stats: route_stats(&scheduled),
            items: scheduled,
            advisories,
        }
    }

    /// Booked duration for an item: the override if given, otherwise the
    /// estimator's value for its primary category.
    fn duration_for(&self, item: &ScheduleItem, party_size: u32) -> i64 {
        match item.duration_override_minutes {
            Some(minutes) => minutes,
            None => self
                .durations
                .estimate(item.primary_category(), party_size)
                .resolve(self.config.duration_policy),
        }
    }

    /// `max(minimum, base * proximity + travel)`, where proximity scales the
    /// base buffer down to zero as the next item approaches the same spot.
    fn buffer_after(&self, travel: &TravelEstimate) -> i64 {
        let walking_threshold = self.distances.config().walking_threshold_km;
        let proximity = if travel.uncertain || walking_threshold <= 0.0 {
            1.0
        } else {
            (travel.distance_km / walking_threshold).clamp(0.0, 1.0)
        };
        let base = (self.config.base_buffer_minutes.max(0) as f64 * proximity).round() as i64;

        base.saturating_add(travel.duration_minutes)
            .max(self.config.minimum_buffer_minutes.max(0))
            .min(MAX_SPAN_MINUTES)
    }
}

/// `at + minutes`, saturating at the end of the representable range.
fn shift(at: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    Duration::try_minutes(minutes)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(if minutes < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// Span occupied by the latest anchor: its start up to the moment the next
/// item may begin (end + travel + buffer).
struct AnchorWindow {
    id: String,
    start: DateTime<Utc>,
    release: DateTime<Utc>,
}

impl AnchorWindow {
    fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.release && (end > self.start || start >= self.start)
    }
}

fn collect_advisories(items: &[ScheduleItem]) -> Vec<ScheduleAdvisory> {
    items
        .iter()
        .filter_map(|item| item.computed.as_ref().map(|c| (item, c)))
        .flat_map(|(item, computed)| {
            computed.advisories.iter().map(|advisory| ScheduleAdvisory {
                item_id: item.id.clone(),
                advisory: advisory.clone(),
            })
        })
        .collect()
}

fn total_duration(items: &[ScheduleItem]) -> i64 {
    let first_start = items.iter().filter_map(ScheduleItem::start_time).min();
    let last_end = items.iter().filter_map(ScheduleItem::end_time).max();
    match (first_start, last_end) {
        (Some(start), Some(end)) => (end - start).num_minutes(),
        _ => 0,
    }
}

fn route_stats(items: &[ScheduleItem]) -> RouteStats {
    let computed: Vec<&ComputedSchedule> = items.iter().filter_map(|i| i.computed.as_ref()).collect();

    let total_travel_minutes: i64 = computed
        .iter()
        .filter_map(|c| c.travel_to_next.as_ref())
        .map(|t| t.duration_minutes)
        .sum();
    let total_activity_minutes: i64 = computed.iter().map(|c| c.duration_minutes()).sum();
    let total_buffer_minutes: i64 = computed.iter().map(|c| c.buffer_after_minutes).sum();

    let total = total_travel_minutes + total_activity_minutes + total_buffer_minutes;
    RouteStats {
        total_items: computed.len(),
        total_travel_minutes,
        total_activity_minutes,
        total_buffer_minutes,
        efficiency_ratio: if total > 0 {
            total_activity_minutes as f64 / total as f64
        } else {
            0.0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::ActivityCategory;
    use crate::geo::{GeoPoint, Location, LocationKind, TravelMethod};
    use crate::itinerary::ItemKind;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0).unwrap()
    }

    fn place(name: &str, lat: f64, lon: f64) -> Location {
        Location::new(name, GeoPoint::new(lat, lon), LocationKind::Activity)
    }

    fn activity(id: &str, loc: Location, minutes: i64) -> ScheduleItem {
        ScheduleItem::new(id, ItemKind::Activity, id, loc).with_duration(minutes)
    }

    #[test]
    fn empty_input_gives_empty_plan() {
        let plan = IntelligentScheduler::new().plan_day(&[], at(8, 0), 2);
        assert!(plan.items.is_empty());
        assert!(plan.advisories.is_empty());
        assert_eq!(plan.total_duration_minutes, 0);
        assert_eq!(plan.stats, RouteStats::default());
    }

    #[test]
    fn single_item_starts_at_day_start_without_travel() {
        let items = vec![activity("a", place("A", 40.0, -73.0), 90)];
        let out = IntelligentScheduler::new().schedule(&items, at(9, 0), 2);
        let computed = out[0].computed.as_ref().unwrap();
        assert_eq!(computed.start_time, at(9, 0));
        assert_eq!(computed.end_time, at(10, 30));
        assert!(computed.travel_to_next.is_none());
        assert_eq!(computed.buffer_after_minutes, 0);
    }

    #[test]
    fn estimator_minimum_is_used_without_override() {
        let item = ScheduleItem::new("m", ItemKind::Activity, "Museum", place("M", 40.0, -73.0))
            .with_categories(vec![ActivityCategory::Museum]);
        let out = IntelligentScheduler::new().schedule(&[item], at(9, 0), 2);
        assert_eq!(out[0].end_time(), Some(at(10, 30)));
    }

    #[test]
    fn midpoint_policy_books_longer() {
        let config = SchedulerConfig {
            duration_policy: DurationPolicy::Midpoint,
            ..SchedulerConfig::default()
        };
        let item = ScheduleItem::new("m", ItemKind::Activity, "Museum", place("M", 40.0, -73.0))
            .with_categories(vec![ActivityCategory::Museum]);
        let out = IntelligentScheduler::with_config(config).schedule(&[item], at(9, 0), 2);
        assert_eq!(out[0].end_time(), Some(at(11, 15)));
    }

    #[test]
    fn co_located_items_are_back_to_back() {
        let hotel = Location::new("Hotel", GeoPoint::new(40.7580, -73.9855), LocationKind::Hotel);
        let items = vec![
            activity("checkin", hotel.clone(), 30),
            activity("dinner", hotel, 60),
        ];
        let out = IntelligentScheduler::new().schedule(&items, at(18, 0), 2);

        let first = out[0].computed.as_ref().unwrap();
        let travel = first.travel_to_next.as_ref().unwrap();
        assert_eq!(travel.method, TravelMethod::Walking);
        assert_eq!(travel.duration_minutes, 1);
        assert_eq!(first.buffer_after_minutes, 5);
        assert_eq!(out[1].start_time(), Some(at(18, 36)));
    }

    #[test]
    fn distant_items_get_base_buffer_plus_travel() {
        // ~2.2 km apart: taxi, 7 minutes
        let items = vec![
            activity("a", place("A", 40.7580, -73.9855), 60),
            activity("b", place("B", 40.7780, -73.9855), 60),
        ];
        let out = IntelligentScheduler::new().schedule(&items, at(9, 0), 2);
        let first = out[0].computed.as_ref().unwrap();
        let travel = first.travel_to_next.as_ref().unwrap();
        assert_eq!(travel.method, TravelMethod::Taxi);
        assert_eq!(first.buffer_after_minutes, 15 + travel.duration_minutes);
        assert_eq!(
            out[1].start_time().unwrap(),
            at(10, 0) + Duration::minutes(travel.duration_minutes + first.buffer_after_minutes)
        );
    }

    #[test]
    fn anchor_keeps_time_and_exact_duration() {
        let jfk = Location::new("JFK", GeoPoint::new(40.6413, -73.7781), LocationKind::Airport);
        let items = vec![
            activity("breakfast", place("Diner", 40.70, -73.90), 45),
            ScheduleItem::new("flight", ItemKind::Flight, "Flight", jfk)
                .anchored_at(at(14, 30))
                .with_duration(320),
        ];
        let out = IntelligentScheduler::new().schedule(&items, at(8, 0), 2);
        let flight = out.iter().find(|i| i.id == "flight").unwrap();
        assert_eq!(flight.start_time(), Some(at(14, 30)));
        assert_eq!(flight.end_time(), Some(at(19, 50)));
    }

    #[test]
    fn early_anchor_wins_and_is_flagged() {
        let items = vec![
            activity("long", place("A", 40.0, -73.0), 300),
            activity("show", place("A", 40.0, -73.0), 60).anchored_at(at(10, 0)),
        ];
        let plan = IntelligentScheduler::new().plan_day(&items, at(8, 0), 2);

        let show = plan.items.iter().find(|i| i.id == "show").unwrap();
        assert_eq!(show.start_time(), Some(at(10, 0)));
        assert!(plan
            .advisories
            .iter()
            .any(|a| a.item_id == "show" && matches!(a.advisory, Advisory::AnchorBeforeCursor { .. })));
    }

    #[test]
    fn same_time_anchors_keep_input_order() {
        let loc = place("Terminal", 40.6413, -73.7781);
        let items = vec![
            activity("first", loc.clone(), 60).anchored_at(at(12, 0)),
            activity("second", loc, 30).anchored_at(at(12, 0)),
        ];
        let plan = IntelligentScheduler::new().plan_day(&items, at(8, 0), 2);

        assert_eq!(plan.items[0].id, "first");
        assert_eq!(plan.items[0].start_time(), Some(at(12, 0)));
        // 13:00 end + 1 min walk + 5 min buffer
        assert_eq!(plan.items[1].id, "second");
        assert_eq!(plan.items[1].start_time(), Some(at(13, 6)));
        assert!(matches!(
            &plan.advisories[0].advisory,
            Advisory::AnchorConflict { conflicts_with, .. } if conflicts_with == "first"
        ));
    }

    #[test]
    fn output_is_chronological() {
        let loc = place("A", 40.0, -73.0);
        let items = vec![
            activity("late", loc.clone(), 60).anchored_at(at(16, 0)),
            activity("early", loc, 60).anchored_at(at(9, 0)),
        ];
        let out = IntelligentScheduler::new().schedule(&items, at(8, 0), 2);
        assert_eq!(out[0].id, "early");
        assert_eq!(out[1].id, "late");
    }

    #[test]
    fn unresolved_location_is_flagged_and_uses_fallback() {
        let items = vec![
            activity("a", place("A", 40.0, -73.0), 60),
            activity("b", Location::unresolved("Somewhere", LocationKind::Activity), 60),
        ];
        let plan = IntelligentScheduler::new().plan_day(&items, at(9, 0), 2);
        let first = plan.items[0].computed.as_ref().unwrap();
        assert!(first.travel_to_next.as_ref().unwrap().uncertain);
        assert_eq!(first.buffer_after_minutes, 45);
        assert!(matches!(
            &plan.advisories[0].advisory,
            Advisory::UncertainTravel { to } if to == "b"
        ));
    }

    #[test]
    fn overrun_is_flagged_when_day_length_is_set() {
        let config = SchedulerConfig {
            max_day_minutes: Some(120),
            ..SchedulerConfig::default()
        };
        let loc = place("A", 40.0, -73.0);
        let items = vec![activity("a", loc.clone(), 60), activity("b", loc, 90)];
        let plan = IntelligentScheduler::with_config(config).plan_day(&items, at(9, 0), 2);
        assert_eq!(plan.advisories.len(), 1);
        assert_eq!(plan.advisories[0].item_id, "b");
    }

    #[test]
    fn stats_account_for_every_minute() {
        let items = vec![
            activity("a", place("A", 40.7580, -73.9855), 60),
            activity("b", place("B", 40.7829, -73.9654), 60),
        ];
        let plan = IntelligentScheduler::new().plan_day(&items, at(9, 0), 2);
        let stats = &plan.stats;
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.total_activity_minutes, 120);
        assert_eq!(
            plan.total_duration_minutes,
            stats.total_activity_minutes + stats.total_travel_minutes + stats.total_buffer_minutes
        );
        assert!(stats.efficiency_ratio > 0.0 && stats.efficiency_ratio < 1.0);
    }

    #[test]
    fn huge_durations_are_capped_not_panicking() {
        let loc = place("A", 40.0, -73.0);
        let items = vec![
            activity("long", loc.clone(), i64::MAX),
            activity("negative", loc.clone(), i64::MIN),
            activity("after", loc, 30),
        ];
        let plan = IntelligentScheduler::new().plan_day(&items, at(9, 0), 2);

        let long = plan.items.iter().find(|i| i.id == "long").unwrap();
        assert_eq!(long.computed.as_ref().unwrap().duration_minutes(), MAX_SPAN_MINUTES);
        let negative = plan.items.iter().find(|i| i.id == "negative").unwrap();
        assert_eq!(negative.computed.as_ref().unwrap().duration_minutes(), 0);

        let capped: Vec<&str> = plan
            .advisories
            .iter()
            .filter(|a| matches!(a.advisory, Advisory::DurationCapped { .. }))
            .map(|a| a.item_id.as_str())
            .collect();
        assert_eq!(capped.len(), 2);
        assert!(capped.contains(&"long") && capped.contains(&"negative"));
    }

    #[test]
    fn extreme_config_values_do_not_overflow() {
        let config = SchedulerConfig {
            base_buffer_minutes: i64::MAX,
            max_day_minutes: Some(i64::MAX),
            ..SchedulerConfig::default()
        };
        let items = vec![
            activity("a", place("A", 40.7580, -73.9855), 60),
            activity("b", place("B", 40.7829, -73.9654), 60),
        ];
        let plan = IntelligentScheduler::with_config(config).plan_day(&items, at(9, 0), 2);
        let first = plan.items[0].computed.as_ref().unwrap();
        assert_eq!(first.buffer_after_minutes, MAX_SPAN_MINUTES);
        assert!(plan.advisories.is_empty());
    }
}
