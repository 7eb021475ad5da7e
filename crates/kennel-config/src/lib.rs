//! kennel-config
//!
//! Persistent user preferences: number formatting, default report
//! granularity and the delivery-map geocoding settings.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, GeoSettings};
