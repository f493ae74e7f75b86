//! Optional reordering of flexible items to cut down on travel.
//!
//! Anchors split the day into segments. Inside each segment the un-anchored
//! items are visited nearest-neighbour first, starting from wherever the
//! traveller is when the segment begins. Anchors never move, and items never
//! cross an anchor. Items without usable coordinates keep their relative
//! order at the end of their segment.

use crate::geo::{haversine_km, GeoPoint};

use super::item::ScheduleItem;

/// Reorder flexible items between anchors by nearest neighbour.
///
/// `start` is where the day begins (usually the hotel); when `None`, the
/// first segment starts at its first item.
pub fn optimize_order(items: &[ScheduleItem], start: Option<GeoPoint>) -> Vec<ScheduleItem> {
    let mut ordered = Vec::with_capacity(items.len());
    let mut position = start;
    let mut segment: Vec<&ScheduleItem> = Vec::new();

    for item in items {
        if item.is_anchor() {
            position = flush_segment(&mut segment, position, &mut ordered);
            ordered.push(item.clone());
            position = item.location.valid_coordinates().or(position);
        } else {
            segment.push(item);
        }
    }
    flush_segment(&mut segment, position, &mut ordered);

    tracing::debug!(items = ordered.len(), "optimized item order");
    ordered
}

/// Sum of straight-line leg distances in the given order, skipping legs
/// with unknown coordinates.
pub fn route_distance_km(items: &[ScheduleItem]) -> f64 {
    items
        .windows(2)
        .filter_map(|pair| {
            let a = pair[0].location.valid_coordinates()?;
            let b = pair[1].location.valid_coordinates()?;
            Some(haversine_km(a, b))
        })
        .sum()
}

/// Emit the segment in nearest-neighbour order and return the final position.
fn flush_segment(
    segment: &mut Vec<&ScheduleItem>,
    mut position: Option<GeoPoint>,
    out: &mut Vec<ScheduleItem>,
) -> Option<GeoPoint> {
    let (mut located, unlocated): (Vec<&ScheduleItem>, Vec<&ScheduleItem>) = segment
        .drain(..)
        .partition(|item| item.location.valid_coordinates().is_some());

    while !located.is_empty() {
        let next_index = match position {
            Some(here) => nearest(&located, here),
            None => 0,
        };
        let next = located.remove(next_index);
        position = next.location.valid_coordinates();
        out.push(next.clone());
    }

    out.extend(unlocated.into_iter().cloned());
    position
}

/// Index of the closest item; ties go to the earliest.
fn nearest(candidates: &[&ScheduleItem], here: GeoPoint) -> usize {
    let mut best_index = 0;
    let mut best_distance = f64::INFINITY;

    for (index, item) in candidates.iter().enumerate() {
        if let Some(point) = item.location.valid_coordinates() {
            let distance = haversine_km(here, point);
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }
    }

    best_index
}
