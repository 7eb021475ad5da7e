//! kennel-geo
//!
//! Geocoding and driving-distance lookups for the delivery map. Providers are
//! injected behind [`Geocoder`] and [`RouteProvider`]; results are memoized in
//! a caller-owned [`LocationCache`].

pub mod cache;
pub mod error;
pub mod http;
pub mod map;
pub mod provider;

pub use cache::LocationCache;
pub use error::GeoError;
pub use http::{NominatimGeocoder, OsrmRouter};
pub use map::{DeliveryMap, DeliveryStop, MapPoint};
pub use provider::{Coordinates, Geocoder, RouteProvider};
