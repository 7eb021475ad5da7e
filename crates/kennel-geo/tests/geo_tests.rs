use std::{cell::Cell, collections::HashMap};

use kennel_domain::TransportRow;
use kennel_geo::{
    Coordinates, DeliveryMap, DeliveryStop, GeoError, Geocoder, LocationCache, RouteProvider,
};

struct FakeGeocoder {
    known: HashMap<&'static str, Coordinates>,
    calls: Cell<usize>,
}

impl FakeGeocoder {
    fn new() -> Self {
        let mut known = HashMap::new();
        known.insert("springfield, mo", Coordinates::new(37.2, -93.3));
        known.insert("tulsa, ok", Coordinates::new(36.15, -95.99));
        known.insert("wichita, ks", Coordinates::new(37.69, -97.34));
        Self {
            known,
            calls: Cell::new(0),
        }
    }
}

impl Geocoder for FakeGeocoder {
    fn geocode(&self, location: &str) -> Result<Coordinates, GeoError> {
        self.calls.set(self.calls.get() + 1);
        self.known
            .get(location.to_lowercase().as_str())
            .copied()
            .ok_or_else(|| GeoError::NotFound(location.to_string()))
    }
}

/// Returns 100 miles per degree of longitude, failing for targets west of -97.
struct FakeRouter {
    calls: Cell<usize>,
}

impl FakeRouter {
    fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

impl RouteProvider for FakeRouter {
    fn driving_miles(&self, from: Coordinates, to: Coordinates) -> Result<f64, GeoError> {
        self.calls.set(self.calls.get() + 1);
        if to.lon < -97.0 {
            return Err(GeoError::InvalidResponse {
                service: "fake",
                message: "NoRoute".into(),
            });
        }
        Ok(((from.lon - to.lon).abs() * 100.0).round())
    }
}

#[test]
fn geocode_hits_provider_once_per_normalized_location() {
    let geocoder = FakeGeocoder::new();
    let mut cache = LocationCache::new();

    let first = cache.geocode(&geocoder, "Tulsa, OK").unwrap();
    let second = cache.geocode(&geocoder, "  tulsa,   ok ").unwrap();

    assert_eq!(first, second);
    assert_eq!(geocoder.calls.get(), 1);
    assert_eq!(cache.location_count(), 1);
}

#[test]
fn failures_are_not_cached() {
    let geocoder = FakeGeocoder::new();
    let mut cache = LocationCache::new();

    assert!(cache.geocode(&geocoder, "Atlantis").is_err());
    assert!(cache.geocode(&geocoder, "Atlantis").is_err());

    assert_eq!(geocoder.calls.get(), 2);
    assert_eq!(cache.location_count(), 0);
    assert!(cache.cached_location("Atlantis").is_none());
}

#[test]
fn empty_location_never_reaches_provider() {
    let geocoder = FakeGeocoder::new();
    let mut cache = LocationCache::new();
    assert!(matches!(cache.geocode(&geocoder, "   "), Err(GeoError::NotFound(_))));
    assert_eq!(geocoder.calls.get(), 0);
}

#[test]
fn distances_are_memoized_by_pair() {
    let geocoder = FakeGeocoder::new();
    let router = FakeRouter::new();
    let mut cache = LocationCache::new();

    let miles = cache
        .driving_miles(&geocoder, &router, "Springfield, MO", "Tulsa, OK")
        .unwrap();
    let again = cache
        .driving_miles(&geocoder, &router, "springfield, mo", "TULSA, OK")
        .unwrap();

    assert_eq!(miles, 269.0);
    assert_eq!(again, miles);
    assert_eq!(router.calls.get(), 1);
    assert_eq!(cache.cached_distance("Springfield, MO", "Tulsa, OK"), Some(269.0));
}

#[test]
fn bounded_cache_evicts_oldest_location() {
    let geocoder = FakeGeocoder::new();
    let mut cache = LocationCache::with_capacity(2);

    cache.geocode(&geocoder, "Springfield, MO").unwrap();
    cache.geocode(&geocoder, "Tulsa, OK").unwrap();
    cache.geocode(&geocoder, "Wichita, KS").unwrap();

    assert_eq!(cache.location_count(), 2);
    assert!(cache.cached_location("Springfield, MO").is_none());
    assert!(cache.cached_location("Wichita, KS").is_some());

    cache.geocode(&geocoder, "Springfield, MO").unwrap();
    assert_eq!(geocoder.calls.get(), 4);
}

#[test]
fn map_omits_unresolved_points_and_totals_routed_miles() {
    let geocoder = FakeGeocoder::new();
    let router = FakeRouter::new();
    let mut cache = LocationCache::new();
    let stops = vec![
        DeliveryStop::new("Bella", "Tulsa, OK"),
        DeliveryStop::new("Max", "Atlantis"),
        DeliveryStop::new("Rocky", "Wichita, KS"),
        DeliveryStop::new("Daisy", "tulsa, ok"),
    ];

    let map = DeliveryMap::build(
        &stops,
        Some("Springfield, MO"),
        &mut cache,
        &geocoder,
        &router,
    );

    assert_eq!(map.origin, Some(Coordinates::new(37.2, -93.3)));
    assert_eq!(map.unresolved, vec!["Atlantis".to_string()]);
    let labels: Vec<&str> = map.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["Bella", "Rocky", "Daisy"]);
    // Wichita has no route, so it is plotted without a distance.
    assert_eq!(map.points[1].miles_from_origin, None);
    assert_eq!(map.total_miles, 538.0);
    assert_eq!(router.calls.get(), 2);
}

#[test]
fn map_without_origin_has_no_distances() {
    let geocoder = FakeGeocoder::new();
    let router = FakeRouter::new();
    let mut cache = LocationCache::new();
    let rows = vec![
        TransportRow {
            destination: Some("Tulsa, OK".into()),
            purpose: Some("Vet visit".into()),
            ..TransportRow::default()
        },
        TransportRow::default(),
    ];

    let map = DeliveryMap::from_transport(&rows, None, &mut cache, &geocoder, &router);

    assert_eq!(map.points.len(), 1);
    assert_eq!(map.points[0].label, "Vet visit");
    assert!(map.origin.is_none());
    assert_eq!(map.total_miles, 0.0);
    assert_eq!(router.calls.get(), 0);
}

#[test]
fn unresolvable_origin_still_plots_stops() {
    let geocoder = FakeGeocoder::new();
    let router = FakeRouter::new();
    let mut cache = LocationCache::new();
    let stops = vec![DeliveryStop::new("Bella", "Tulsa, OK")];

    let map = DeliveryMap::build(&stops, Some("Atlantis"), &mut cache, &geocoder, &router);

    assert!(map.origin.is_none());
    assert_eq!(map.points.len(), 1);
    assert!(map.unresolved.is_empty());
    assert_eq!(router.calls.get(), 0);
}
