pub mod build_info;

use std::{env, sync::Once};

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();
const DEFAULT_DIRECTIVES: [&str; 3] = ["kennel_books=info", "kennel_core=info", "kennel_geo=info"];

/// Installs the global fmt subscriber. `RUST_LOG` directives are layered on
/// top of the workspace defaults; logs go to stderr so command output stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
        let _ = fmt()
            .with_env_filter(layered_filter(rust_log.as_deref()))
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Defaults first, then each parseable `overrides` directive. A directive for
/// the same target replaces the default one.
fn layered_filter(overrides: Option<&str>) -> EnvFilter {
    let extra = overrides
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|raw| !raw.is_empty());
    DEFAULT_DIRECTIVES
        .into_iter()
        .chain(extra)
        .filter_map(|raw| raw.parse::<Directive>().ok())
        .fold(EnvFilter::default(), EnvFilter::add_directive)
}
