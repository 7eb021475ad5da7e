use kennel_domain::{ParseError, ParseTarget, WindowError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Data fetch failed: {0}")]
    DataFetch(String),
    #[error("Invalid window: {0}")]
    InvalidWindow(#[from] WindowError),
    #[error("Invalid granularity: {0}")]
    InvalidGranularity(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
    #[error("Invalid view: {0}")]
    InvalidView(String),
}

impl From<ParseError> for CoreError {
    fn from(err: ParseError) -> Self {
        match err.target {
            ParseTarget::Field => CoreError::InvalidField(err.input),
            ParseTarget::Granularity => CoreError::InvalidGranularity(err.input),
            ParseTarget::View => CoreError::InvalidView(err.input),
        }
    }
}
