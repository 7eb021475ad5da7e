use std::fmt;

use serde::{Deserialize, Serialize};

use crate::GeoError;

const METERS_PER_MILE: f64 = 1609.344;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lon)
    }
}

/// Resolves free-text locations to coordinates.
pub trait Geocoder {
    fn geocode(&self, location: &str) -> Result<Coordinates, GeoError>;
}

/// Computes driving distances between two points.
pub trait RouteProvider {
    /// Driving distance in miles.
    fn driving_miles(&self, from: Coordinates, to: Coordinates) -> Result<f64, GeoError>;
}

pub(crate) fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_meters() {
        assert!((meters_to_miles(1609.344) - 1.0).abs() < 1e-12);
        assert_eq!(meters_to_miles(0.0), 0.0);
    }

    #[test]
    fn display_uses_lat_lon_order() {
        assert_eq!(Coordinates::new(37.2, -93.3).to_string(), "37.20000,-93.30000");
    }
}
