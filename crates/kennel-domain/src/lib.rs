//! kennel-domain
//!
//! Pure data types for the kennel books reporting engine: normalized transaction
//! records, raw source-table rows, reporting windows, aggregate results and the
//! dashboard navigation key. No I/O and no aggregation logic live here.

pub mod common;
pub mod lenient;
pub mod navigation;
pub mod record;
pub mod results;
pub mod rows;
pub mod window;

pub use common::*;
pub use navigation::*;
pub use record::*;
pub use results::*;
pub use rows::*;
pub use window::*;
