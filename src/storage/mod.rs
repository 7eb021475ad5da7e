//! File-backed record sources.

pub mod json_source;

pub use json_source::{load_snapshot, save_snapshot, JsonRecordSource};
