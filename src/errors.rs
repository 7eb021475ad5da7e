use thiserror::Error;

use kennel_config::ConfigError;
use kennel_core::CoreError;
use kennel_geo::GeoError;

/// Top-level error for the library facade and the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Geo(#[from] GeoError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}

impl AppError {
    pub fn usage(message: impl Into<String>) -> Self {
        AppError::Usage(message.into())
    }
}

impl From<clap::Error> for AppError {
    fn from(err: clap::Error) -> Self {
        let rendered = err.render().to_string();
        AppError::usage(rendered.trim_start_matches("error: ").trim_end())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
