//! kennel-core
//!
//! The financial aggregation engine: date bucketing, record filtering,
//! aggregation, series building and period-over-period trends, plus the
//! adapters and report service that feed it from the data store.
//! Depends on kennel-domain. No terminal I/O, no network access.

pub mod adapters;
pub mod aggregate;
pub mod bucketing;
pub mod error;
pub mod filter;
pub mod format;
pub mod report_service;
pub mod series;
pub mod source;
pub mod time;
pub mod trend;

pub use adapters::*;
pub use aggregate::*;
pub use bucketing::*;
pub use error::CoreError;
pub use filter::*;
pub use format::*;
pub use report_service::*;
pub use series::*;
pub use source::*;
pub use time::*;
pub use trend::*;

#[cfg(test)]
mod tests;
