//! Geography: coordinates, locations and travel between them.

mod distance;
mod point;

pub use distance::{
    haversine_km, DistanceCalculator, TravelConfig, TravelEstimate, TravelMethod,
    EARTH_RADIUS_KM,
};
pub use point::{GeoPoint, Location, LocationKind};
