use std::{
    collections::{HashMap, VecDeque},
    hash::Hash,
};

use crate::{
    provider::{Coordinates, Geocoder, RouteProvider},
    GeoError,
};

/// Insertion-ordered map that drops its oldest entry once full.
#[derive(Debug, Clone)]
struct BoundedMap<K, V> {
    capacity: Option<usize>,
    entries: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K: Eq + Hash + Clone, V: Copy> BoundedMap<K, V> {
    fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).copied()
    }

    fn insert(&mut self, key: K, value: V) {
        if self.capacity == Some(0) {
            return;
        }
        if self.entries.insert(key.clone(), value).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.capacity.is_some_and(|cap| self.order.len() > cap) {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Memoizes geocoding and routing results for the lifetime of its owner.
///
/// Locations are keyed by their normalized text (trimmed, lowercased, inner
/// whitespace collapsed); distances by the normalized origin/destination pair.
/// Failed lookups are never stored, so a later call retries them.
#[derive(Debug, Clone)]
pub struct LocationCache {
    locations: BoundedMap<String, Coordinates>,
    distances: BoundedMap<(String, String), f64>,
}

impl Default for LocationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationCache {
    pub fn new() -> Self {
        Self::bounded(None)
    }

    /// Caps each of the two tables at `capacity` entries, evicting the oldest first.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::bounded(Some(capacity))
    }

    pub fn bounded(capacity: Option<usize>) -> Self {
        Self {
            locations: BoundedMap::new(capacity),
            distances: BoundedMap::new(capacity),
        }
    }

    pub fn normalize(location: &str) -> String {
        location
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    pub fn cached_location(&self, location: &str) -> Option<Coordinates> {
        self.locations.get(&Self::normalize(location))
    }

    pub fn cached_distance(&self, origin: &str, destination: &str) -> Option<f64> {
        self.distances
            .get(&(Self::normalize(origin), Self::normalize(destination)))
    }

    pub fn geocode(
        &mut self,
        geocoder: &dyn Geocoder,
        location: &str,
    ) -> Result<Coordinates, GeoError> {
        let key = Self::normalize(location);
        if key.is_empty() {
            return Err(GeoError::NotFound(location.to_string()));
        }
        if let Some(hit) = self.locations.get(&key) {
            return Ok(hit);
        }
        let coords = geocoder.geocode(location.trim())?;
        self.locations.insert(key, coords);
        Ok(coords)
    }

    /// Driving miles between two free-text locations, geocoding both ends as needed.
    pub fn driving_miles(
        &mut self,
        geocoder: &dyn Geocoder,
        router: &dyn RouteProvider,
        origin: &str,
        destination: &str,
    ) -> Result<f64, GeoError> {
        let key = (Self::normalize(origin), Self::normalize(destination));
        if let Some(miles) = self.distances.get(&key) {
            return Ok(miles);
        }
        let from = self.geocode(geocoder, origin)?;
        let to = self.geocode(geocoder, destination)?;
        let miles = router.driving_miles(from, to)?;
        self.distances.insert(key, miles);
        Ok(miles)
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn distance_count(&self) -> usize {
        self.distances.len()
    }

    pub fn clear(&mut self) {
        self.locations.clear();
        self.distances.clear();
    }
}
