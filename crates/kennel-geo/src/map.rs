//! Delivery map assembly.

use serde::Serialize;

use kennel_domain::TransportRow;

use crate::{
    cache::LocationCache,
    provider::{Coordinates, Geocoder, RouteProvider},
};

/// A destination to plot, labelled for the map legend.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryStop {
    pub label: String,
    pub location: String,
}

impl DeliveryStop {
    pub fn new(label: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            location: location.into(),
        }
    }

    /// Trips without a destination are not plotted.
    pub fn from_transport(row: &TransportRow) -> Option<Self> {
        let location = row.destination.as_deref()?.trim();
        if location.is_empty() {
            return None;
        }
        let label = row
            .purpose
            .clone()
            .or_else(|| row.id.clone())
            .unwrap_or_else(|| location.to_string());
        Some(Self::new(label, location))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub label: String,
    pub location: String,
    pub coordinates: Coordinates,
    /// Driving distance from the origin, when an origin was given and routing succeeded.
    pub miles_from_origin: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeliveryMap {
    pub origin: Option<Coordinates>,
    pub points: Vec<MapPoint>,
    /// Locations that could not be geocoded.
    pub unresolved: Vec<String>,
    /// Sum of `miles_from_origin` over the plotted points.
    pub total_miles: f64,
}

impl DeliveryMap {
    /// Geocodes every stop and, when `origin` is set, routes to each one from it.
    ///
    /// Lookup failures never abort the build. A stop that cannot be geocoded is
    /// left off the map and listed in `unresolved`; a stop that cannot be routed
    /// is plotted without a distance.
    pub fn build(
        stops: &[DeliveryStop],
        origin: Option<&str>,
        cache: &mut LocationCache,
        geocoder: &dyn Geocoder,
        router: &dyn RouteProvider,
    ) -> Self {
        let mut map = DeliveryMap::default();
        let origin = origin.map(str::trim).filter(|text| !text.is_empty());
        if let Some(text) = origin {
            match cache.geocode(geocoder, text) {
                Ok(coords) => map.origin = Some(coords),
                Err(err) => {
                    tracing::warn!(origin = %text, error = %err, "could not geocode map origin")
                }
            }
        }

        for stop in stops {
            let coordinates = match cache.geocode(geocoder, &stop.location) {
                Ok(coords) => coords,
                Err(err) => {
                    tracing::warn!(location = %stop.location, error = %err, "omitting unresolved stop");
                    if !map.unresolved.contains(&stop.location) {
                        map.unresolved.push(stop.location.clone());
                    }
                    continue;
                }
            };
            let miles_from_origin = match (origin, map.origin) {
                (Some(text), Some(_)) => {
                    match cache.driving_miles(geocoder, router, text, &stop.location) {
                        Ok(miles) => Some(miles),
                        Err(err) => {
                            tracing::warn!(location = %stop.location, error = %err, "no driving route");
                            None
                        }
                    }
                }
                _ => None,
            };
            map.points.push(MapPoint {
                label: stop.label.clone(),
                location: stop.location.clone(),
                coordinates,
                miles_from_origin,
            });
        }

        map.total_miles = map.points.iter().filter_map(|p| p.miles_from_origin).sum();
        tracing::info!(
            points = map.points.len(),
            unresolved = map.unresolved.len(),
            total_miles = map.total_miles,
            "built delivery map"
        );
        map
    }

    pub fn from_transport(
        rows: &[TransportRow],
        origin: Option<&str>,
        cache: &mut LocationCache,
        geocoder: &dyn Geocoder,
        router: &dyn RouteProvider,
    ) -> Self {
        let stops: Vec<DeliveryStop> = rows.iter().filter_map(DeliveryStop::from_transport).collect();
        Self::build(&stops, origin, cache, geocoder, router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_label_prefers_purpose() {
        let row = TransportRow {
            id: Some("t-1".into()),
            destination: Some(" Tulsa, OK ".into()),
            purpose: Some("Puppy delivery".into()),
            ..TransportRow::default()
        };
        let stop = DeliveryStop::from_transport(&row).unwrap();
        assert_eq!(stop.label, "Puppy delivery");
        assert_eq!(stop.location, "Tulsa, OK");
    }

    #[test]
    fn blank_destination_is_skipped() {
        let row = TransportRow {
            destination: Some("   ".into()),
            ..TransportRow::default()
        };
        assert!(DeliveryStop::from_transport(&row).is_none());
        assert!(DeliveryStop::from_transport(&TransportRow::default()).is_none());
    }
}
