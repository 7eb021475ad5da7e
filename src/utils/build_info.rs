use std::fmt;

use serde::Serialize;

/// Values stamped into the binary by `build.rs`; `"unknown"` when a build
/// ran without them (e.g. outside a git checkout).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

macro_rules! stamped {
    ($key:literal) => {
        match option_env!(concat!("KENNEL_BOOKS_BUILD_", $key)) {
            Some(value) => value,
            None => "unknown",
        }
    };
}

impl BuildMetadata {
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_hash: stamped!("HASH"),
            git_status: stamped!("STATUS"),
            timestamp: stamped!("TIMESTAMP"),
            target: stamped!("TARGET"),
            profile: stamped!("PROFILE"),
            rustc: stamped!("RUSTC"),
        }
    }
}

impl fmt::Display for BuildMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Build hash : {} ({})", self.git_hash, self.git_status)?;
        writeln!(f, "  Built at   : {}", self.timestamp)?;
        writeln!(f, "  Target     : {}", self.target)?;
        writeln!(f, "  Profile    : {}", self.profile)?;
        write!(f, "  Rustc      : {}", self.rustc)
    }
}
