//! Straight-line distance and travel estimation between locations.
//!
//! Distance is the haversine great-circle distance. Travel is derived from
//! distance bands: short hops are walked, medium ones take the configured
//! short-range method, and anything longer is driven. Duration comes from an
//! assumed speed per method and never drops below a one-minute floor.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::point::{GeoPoint, Location};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// How a traveller gets between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMethod {
    Walking,
    Taxi,
    PublicTransport,
    Driving,
}

impl TravelMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMethod::Walking => "walking",
            TravelMethod::Taxi => "taxi",
            TravelMethod::PublicTransport => "public_transport",
            TravelMethod::Driving => "driving",
        }
    }
}

/// Estimated travel leg between two locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelEstimate {
    pub distance_km: f64,
    pub duration_minutes: i64,
    pub method: TravelMethod,
    /// Only present for paid methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_amount: Option<f64>,
    /// True when coordinates were missing and this is the fixed fallback.
    #[serde(default)]
    pub uncertain: bool,
}

/// Distance bands, speeds and fares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelConfig {
    /// Below this distance, walk
    #[serde(default = "default_walking_threshold_km")]
    pub walking_threshold_km: f64,
    /// Below this distance, use `short_range_method`; at or above, drive
    #[serde(default = "default_short_range_threshold_km")]
    pub short_range_threshold_km: f64,
    /// Taxi or public transport for medium hops
    #[serde(default = "default_short_range_method")]
    pub short_range_method: TravelMethod,
    #[serde(default = "default_walking_speed")]
    pub walking_speed_kmh: f64,
    #[serde(default = "default_taxi_speed")]
    pub taxi_speed_kmh: f64,
    #[serde(default = "default_transit_speed")]
    pub public_transport_speed_kmh: f64,
    #[serde(default = "default_driving_speed")]
    pub driving_speed_kmh: f64,
    /// Shortest duration ever reported for a leg
    #[serde(default = "default_minimum_minutes")]
    pub minimum_minutes: i64,
    #[serde(default = "default_taxi_flat_fee")]
    pub taxi_flat_fee: f64,
    #[serde(default = "default_taxi_per_km")]
    pub taxi_per_km: f64,
    #[serde(default = "default_driving_flat_fee")]
    pub driving_flat_fee: f64,
    #[serde(default = "default_driving_per_km")]
    pub driving_per_km: f64,
    /// Flat transit fare; zero makes transit free
    #[serde(default = "default_transit_fare")]
    pub public_transport_fare: f64,
    /// Duration used when coordinates are unusable
    #[serde(default = "default_fallback_minutes")]
    pub fallback_minutes: i64,
}

fn default_walking_threshold_km() -> f64 {
    0.3
}
fn default_short_range_threshold_km() -> f64 {
    5.0
}
fn default_short_range_method() -> TravelMethod {
    TravelMethod::Taxi
}
fn default_walking_speed() -> f64 {
    4.8
}
fn default_taxi_speed() -> f64 {
    20.0
}
fn default_transit_speed() -> f64 {
    18.0
}
fn default_driving_speed() -> f64 {
    35.0
}
fn default_minimum_minutes() -> i64 {
    1
}
fn default_taxi_flat_fee() -> f64 {
    3.0
}
fn default_taxi_per_km() -> f64 {
    2.5
}
fn default_driving_flat_fee() -> f64 {
    5.0
}
fn default_driving_per_km() -> f64 {
    1.8
}
fn default_transit_fare() -> f64 {
    2.9
}
fn default_fallback_minutes() -> i64 {
    30
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            walking_threshold_km: default_walking_threshold_km(),
            short_range_threshold_km: default_short_range_threshold_km(),
            short_range_method: default_short_range_method(),
            walking_speed_kmh: default_walking_speed(),
            taxi_speed_kmh: default_taxi_speed(),
            public_transport_speed_kmh: default_transit_speed(),
            driving_speed_kmh: default_driving_speed(),
            minimum_minutes: default_minimum_minutes(),
            taxi_flat_fee: default_taxi_flat_fee(),
            taxi_per_km: default_taxi_per_km(),
            driving_flat_fee: default_driving_flat_fee(),
            driving_per_km: default_driving_per_km(),
            public_transport_fare: default_transit_fare(),
            fallback_minutes: default_fallback_minutes(),
        }
    }
}

/// Great-circle distance in kilometres.
///
/// Points are put in a canonical order first so the result is bit-for-bit
/// symmetric. Identical points give exactly zero.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (p, q) = match canonical_order(&a, &b) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    };

    let lat1 = p.latitude.to_radians();
    let lat2 = q.latitude.to_radians();
    let delta_lat = (q.latitude - p.latitude).to_radians();
    let delta_lon = (q.longitude - p.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

fn canonical_order(a: &GeoPoint, b: &GeoPoint) -> Ordering {
    a.latitude
        .total_cmp(&b.latitude)
        .then(a.longitude.total_cmp(&b.longitude))
}

/// Turns coordinates into travel estimates.
#[derive(Debug, Clone, Default)]
pub struct DistanceCalculator {
    config: TravelConfig,
}

impl DistanceCalculator {
    /// Create a calculator with default bands and fares
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: TravelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TravelConfig {
        &self.config
    }

    /// Distance between two points in kilometres.
    pub fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        haversine_km(a, b)
    }

    /// Estimate the travel leg between two locations.
    ///
    /// Missing or invalid coordinates on either side yield the fixed
    /// uncertain estimate instead of an error.
    pub fn estimate_travel(&self, from: &Location, to: &Location) -> TravelEstimate {
        match (from.valid_coordinates(), to.valid_coordinates()) {
            (Some(a), Some(b)) => self.estimate_for_distance(haversine_km(a, b)),
            _ => {
                tracing::debug!(
                    from = %from.name,
                    to = %to.name,
                    "coordinates unavailable, using uncertain travel estimate"
                );
                self.uncertain_estimate()
            }
        }
    }

    /// Estimate a leg of the given length.
    pub fn estimate_for_distance(&self, distance_km: f64) -> TravelEstimate {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return self.uncertain_estimate();
        }

        let method = self.method_for_distance(distance_km);
        let speed = self.speed_for(method);
        let raw_minutes = if speed > 0.0 {
            (distance_km / speed * 60.0).round() as i64
        } else {
            self.config.fallback_minutes
        };

        TravelEstimate {
            distance_km,
            duration_minutes: raw_minutes.max(self.config.minimum_minutes.max(1)),
            method,
            cost_amount: self.cost_for(method, distance_km),
            uncertain: false,
        }
    }

    /// The fixed estimate used when a distance cannot be computed.
    pub fn uncertain_estimate(&self) -> TravelEstimate {
        TravelEstimate {
            distance_km: 0.0,
            duration_minutes: self.config.fallback_minutes.max(self.config.minimum_minutes.max(1)),
            method: self.short_range_method(),
            cost_amount: None,
            uncertain: true,
        }
    }

    fn method_for_distance(&self, distance_km: f64) -> TravelMethod {
        if distance_km < self.config.walking_threshold_km {
            TravelMethod::Walking
        } else if distance_km < self.config.short_range_threshold_km {
            self.short_range_method()
        } else {
            TravelMethod::Driving
        }
    }

    /// Medium hops only ever use taxi or transit.
    fn short_range_method(&self) -> TravelMethod {
        match self.config.short_range_method {
            TravelMethod::PublicTransport => TravelMethod::PublicTransport,
            _ => TravelMethod::Taxi,
        }
    }

    fn speed_for(&self, method: TravelMethod) -> f64 {
        match method {
            TravelMethod::Walking => self.config.walking_speed_kmh,
            TravelMethod::Taxi => self.config.taxi_speed_kmh,
            TravelMethod::PublicTransport => self.config.public_transport_speed_kmh,
            TravelMethod::Driving => self.config.driving_speed_kmh,
        }
    }

    fn cost_for(&self, method: TravelMethod, distance_km: f64) -> Option<f64> {
        let cost = match method {
            TravelMethod::Walking => return None,
            TravelMethod::PublicTransport => {
                let fare = self.config.public_transport_fare;
                if !fare.is_finite() || fare <= 0.0 {
                    return None;
                }
                fare
            }
            TravelMethod::Taxi => self.config.taxi_flat_fee + self.config.taxi_per_km * distance_km,
            TravelMethod::Driving => {
                self.config.driving_flat_fee + self.config.driving_per_km * distance_km
            }
        };
        Some(round_cents(cost))
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
