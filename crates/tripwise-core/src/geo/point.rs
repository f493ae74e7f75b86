//! Coordinates and named locations.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a point, rejecting non-finite or out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let point = Self::new(latitude, longitude);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(ValidationError::InvalidCoordinates {
                latitude,
                longitude,
            })
        }
    }

    /// Finite and inside [-90, 90] x [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::str::FromStr for GeoPoint {
    type Err = ValidationError;

    /// Parse `"lat,lon"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidValue {
            field: "coordinates".to_string(),
            message: format!("expected 'lat,lon', got '{s}'"),
        };
        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;
        Self::try_new(latitude, longitude)
    }
}

/// What kind of place a location is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Airport,
    Hotel,
    Activity,
    Restaurant,
    Transport,
}

/// A named place. Coordinates may be missing when a provider did not
/// geocode it; travel to or from such a place is estimated as uncertain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    pub kind: LocationKind,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinates: GeoPoint, kind: LocationKind) -> Self {
        Self {
            name: name.into(),
            coordinates: Some(coordinates),
            kind,
        }
    }

    /// A location without coordinates.
    pub fn unresolved(name: impl Into<String>, kind: LocationKind) -> Self {
        Self {
            name: name.into(),
            coordinates: None,
            kind,
        }
    }

    /// Coordinates, if present and valid.
    pub fn valid_coordinates(&self) -> Option<GeoPoint> {
        self.coordinates.filter(GeoPoint::is_valid)
    }
}
