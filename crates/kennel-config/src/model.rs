use serde::{Deserialize, Serialize};

use kennel_domain::Granularity;

use crate::ConfigError;

/// Stores user-configurable report preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_precision")]
    pub number_precision: u8,
    #[serde(default = "Config::default_decimal_separator")]
    pub decimal_separator: char,
    #[serde(default = "Config::default_grouping_separator")]
    pub grouping_separator: char,
    #[serde(default)]
    pub report_granularity: Granularity,
    #[serde(default)]
    pub geo: GeoSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            number_precision: Self::default_precision(),
            decimal_separator: Self::default_decimal_separator(),
            grouping_separator: Self::default_grouping_separator(),
            report_granularity: Granularity::Month,
            geo: GeoSettings::default(),
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_precision() -> u8 {
        2
    }

    pub fn default_decimal_separator() -> char {
        '.'
    }

    pub fn default_grouping_separator() -> char {
        ','
    }

    /// Rejects settings that would make formatted numbers ambiguous.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimal_separator == self.grouping_separator {
            return Err(ConfigError::Invalid {
                key: "grouping_separator",
                message: "must differ from the decimal separator".into(),
            });
        }
        if self.number_precision > 6 {
            return Err(ConfigError::Invalid {
                key: "number_precision",
                message: format!("{} exceeds the maximum of 6", self.number_precision),
            });
        }
        if self.geo.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "geo.timeout_secs",
                message: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }
}

/// Endpoints and limits for the delivery map's geocoding and routing lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoSettings {
    #[serde(default = "GeoSettings::default_geocoder_url")]
    pub geocoder_url: String,
    #[serde(default = "GeoSettings::default_router_url")]
    pub router_url: String,
    #[serde(default = "GeoSettings::default_user_agent")]
    pub user_agent: String,
    #[serde(default = "GeoSettings::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Free-text starting point for delivery distances (usually the kennel address).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Upper bound on cached lookups per cache. `None` keeps every entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_capacity: Option<usize>,
}

impl Default for GeoSettings {
    fn default() -> Self {
        Self {
            geocoder_url: Self::default_geocoder_url(),
            router_url: Self::default_router_url(),
            user_agent: Self::default_user_agent(),
            timeout_secs: Self::default_timeout_secs(),
            origin: None,
            cache_capacity: None,
        }
    }
}

impl GeoSettings {
    pub fn default_geocoder_url() -> String {
        "https://nominatim.openstreetmap.org".into()
    }

    pub fn default_router_url() -> String {
        "https://router.project-osrm.org".into()
    }

    pub fn default_user_agent() -> String {
        format!("kennel-books/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn default_timeout_secs() -> u64 {
        10
    }
}
