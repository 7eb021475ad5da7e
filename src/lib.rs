#![doc(test(attr(deny(warnings))))]

//! Kennel Books reporting: financial aggregation over kennel sales, refunds,
//! payouts and bills, plus the delivery map and a reporting CLI.
//!
//! The engine lives in the `kennel-*` workspace crates; this crate wires them
//! to a JSON snapshot source, user configuration and tracing.

pub mod cli;
pub mod errors;
pub mod storage;
pub mod utils;

pub use errors::{AppError, Result};
pub use kennel_config as config;
pub use kennel_core as engine;
pub use kennel_domain as domain;
pub use kennel_geo as geo;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT.call_once(|| {
        utils::init_tracing();
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "kennel books initialized");
    });
}
