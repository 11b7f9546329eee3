//! Geographic locations and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A named point on the Earth's surface.
///
/// Coordinates are in decimal degrees. Locations are plain values; nothing
/// in the planner mutates them after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Human-readable address, used in diagnostics
    pub address: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Location {
    /// Creates a new location.
    pub fn new(address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            address: address.into(),
            lat,
            lng,
        }
    }

    /// Returns the great-circle distance to `other` in metres.
    pub fn distance_to(&self, other: &Location) -> f64 {
        distance_meters(self, other)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.5}, {:.5})", self.address, self.lat, self.lng)
    }
}

/// Haversine great-circle distance between two locations, in metres.
///
/// # Examples
///
/// ```
/// use journey_dispatch::domain::{Location, distance_meters};
///
/// let london = Location::new("London", 51.5074, -0.1278);
/// let paris = Location::new("Paris", 48.8566, 2.3522);
///
/// let d = distance_meters(&london, &paris);
/// assert!((d - 343_556.0).abs() < 100.0);
/// ```
pub fn distance_meters(a: &Location, b: &Location) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_M * c
}
