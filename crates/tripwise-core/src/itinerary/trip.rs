//! Day-by-day trip structure.
//!
//! Arrival days start late, departure days end early, and everything in
//! between is a full day.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a day within the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Arrival,
    Full,
    Departure,
}

impl DayType {
    /// Earliest time to schedule anything
    pub fn day_start(&self) -> NaiveTime {
        match self {
            DayType::Arrival => hm(10, 0),
            DayType::Full | DayType::Departure => hm(9, 0),
        }
    }

    /// Latest time anything should end
    pub fn day_end(&self) -> NaiveTime {
        match self {
            DayType::Arrival | DayType::Full => hm(21, 0),
            DayType::Departure => hm(15, 0),
        }
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// One calendar day of the trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDay {
    /// 1-based day number
    pub day: u32,
    pub date: NaiveDate,
    pub day_type: DayType,
}

impl TripDay {
    /// Day start as a UTC timestamp, ready for the scheduler.
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.date.and_time(self.day_type.day_start()).and_utc()
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.date.and_time(self.day_type.day_end()).and_utc()
    }

    /// Minutes between day start and day end.
    pub fn available_minutes(&self) -> i64 {
        (self.ends_at() - self.starts_at()).num_minutes()
    }
}

/// Split an inclusive date range into trip days.
///
/// The first day is the arrival, the last is the departure. A one-day trip
/// is just an arrival. An inverted range yields no days.
pub fn plan_trip_days(start: NaiveDate, end: NaiveDate) -> Vec<TripDay> {
    if end < start {
        return Vec::new();
    }

    let total = (end - start).num_days() + 1;
    (0..total)
        .map(|offset| {
            let day_type = if offset == 0 {
                DayType::Arrival
            } else if offset == total - 1 {
                DayType::Departure
            } else {
                DayType::Full
            };
            TripDay {
                day: offset as u32 + 1,
                date: start + Duration::days(offset),
                day_type,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn four_day_trip_structure() {
        let days = plan_trip_days(date(2025, 3, 15), date(2025, 3, 18));
        let types: Vec<DayType> = days.iter().map(|d| d.day_type).collect();
        assert_eq!(
            types,
            vec![DayType::Arrival, DayType::Full, DayType::Full, DayType::Departure]
        );
        assert_eq!(days[3].day, 4);
        assert_eq!(days[3].date, date(2025, 3, 18));
    }

    #[test]
    fn single_day_is_arrival() {
        let days = plan_trip_days(date(2025, 3, 15), date(2025, 3, 15));
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day_type, DayType::Arrival);
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(plan_trip_days(date(2025, 3, 15), date(2025, 3, 14)).is_empty());
    }

    #[test]
    fn departure_day_is_short() {
        let days = plan_trip_days(date(2025, 3, 15), date(2025, 3, 16));
        assert_eq!(days[0].available_minutes(), 11 * 60);
        assert_eq!(days[1].available_minutes(), 6 * 60);
        assert_eq!(days[1].starts_at().to_rfc3339(), "2025-03-16T09:00:00+00:00");
    }
}
