//! HTTP providers backed by Nominatim (geocoding) and OSRM (routing).

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use kennel_config::GeoSettings;

use crate::{
    provider::{meters_to_miles, Coordinates, Geocoder, RouteProvider},
    GeoError,
};

fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, GeoError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?)
}

pub struct NominatimGeocoder {
    base_url: String,
    client: Client,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, GeoError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(user_agent, timeout)?,
        })
    }

    pub fn from_settings(settings: &GeoSettings) -> Result<Self, GeoError> {
        Self::new(
            &settings.geocoder_url,
            &settings.user_agent,
            Duration::from_secs(settings.timeout_secs),
        )
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, location: &str) -> Result<Coordinates, GeoError> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(%location, "geocoding");
        let body: serde_json::Value = self
            .client
            .get(&url)
            .query(&[("q", location), ("format", "json"), ("limit", "1")])
            .send()?
            .error_for_status()?
            .json()?;
        parse_search(location, &body)
    }
}

#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Takes the first hit of a Nominatim `/search?format=json` response.
pub fn parse_search(location: &str, body: &serde_json::Value) -> Result<Coordinates, GeoError> {
    let hits: Vec<SearchHit> =
        serde_json::from_value(body.clone()).map_err(|err| GeoError::InvalidResponse {
            service: "nominatim",
            message: err.to_string(),
        })?;
    let hit = hits
        .into_iter()
        .next()
        .ok_or_else(|| GeoError::NotFound(location.to_string()))?;
    let parse = |raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|err| GeoError::InvalidResponse {
                service: "nominatim",
                message: format!("bad coordinate `{raw}`: {err}"),
            })
    };
    Ok(Coordinates::new(parse(&hit.lat)?, parse(&hit.lon)?))
}

pub struct OsrmRouter {
    base_url: String,
    client: Client,
}

impl OsrmRouter {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, GeoError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(user_agent, timeout)?,
        })
    }

    pub fn from_settings(settings: &GeoSettings) -> Result<Self, GeoError> {
        Self::new(
            &settings.router_url,
            &settings.user_agent,
            Duration::from_secs(settings.timeout_secs),
        )
    }
}

impl RouteProvider for OsrmRouter {
    fn driving_miles(&self, from: Coordinates, to: Coordinates) -> Result<f64, GeoError> {
        // OSRM takes lon,lat pairs.
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url, from.lon, from.lat, to.lon, to.lat
        );
        let body: serde_json::Value = self
            .client
            .get(&url)
            .query(&[("overview", "false")])
            .send()?
            .error_for_status()?
            .json()?;
        parse_route(&body)
    }
}

#[derive(Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Deserialize)]
struct Route {
    distance: f64,
}

/// Reads the first route's distance (meters) and converts it to miles.
pub fn parse_route(body: &serde_json::Value) -> Result<f64, GeoError> {
    let response: RouteResponse =
        serde_json::from_value(body.clone()).map_err(|err| GeoError::InvalidResponse {
            service: "osrm",
            message: err.to_string(),
        })?;
    if response.code != "Ok" {
        return Err(GeoError::InvalidResponse {
            service: "osrm",
            message: format!("status {}", response.code),
        });
    }
    response
        .routes
        .first()
        .map(|route| meters_to_miles(route.distance))
        .ok_or_else(|| GeoError::InvalidResponse {
            service: "osrm",
            message: "no routes returned".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_first_search_hit() {
        let body = json!([
            {"lat": "37.2090", "lon": "-93.2923", "display_name": "Springfield"},
            {"lat": "0", "lon": "0"}
        ]);
        let coords = parse_search("Springfield, MO", &body).unwrap();
        assert_eq!(coords, Coordinates::new(37.209, -93.2923));
    }

    #[test]
    fn empty_search_is_not_found() {
        let err = parse_search("Nowhere", &json!([])).unwrap_err();
        assert!(matches!(err, GeoError::NotFound(ref q) if q == "Nowhere"));
    }

    #[test]
    fn malformed_search_is_invalid() {
        let err = parse_search("x", &json!({"error": "rate limited"})).unwrap_err();
        assert!(matches!(err, GeoError::InvalidResponse { service: "nominatim", .. }));
        let err = parse_search("x", &json!([{"lat": "north", "lon": "1"}])).unwrap_err();
        assert!(matches!(err, GeoError::InvalidResponse { .. }));
    }

    #[test]
    fn parses_route_distance_in_miles() {
        let body = json!({"code": "Ok", "routes": [{"distance": 16093.44, "duration": 600.0}]});
        let miles = parse_route(&body).unwrap();
        assert!((miles - 10.0).abs() < 1e-9);
    }

    #[test]
    fn route_error_codes_are_rejected() {
        let err = parse_route(&json!({"code": "NoRoute", "routes": []})).unwrap_err();
        assert!(err.to_string().contains("NoRoute"));
        assert!(parse_route(&json!({"code": "Ok", "routes": []})).is_err());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let geocoder =
            NominatimGeocoder::new("https://geo.test/", "kennel-books-tests", Duration::from_secs(1))
                .unwrap();
        assert_eq!(geocoder.base_url, "https://geo.test");
    }
}
