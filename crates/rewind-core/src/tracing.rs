//! Tracing subscriber setup.
//!
//! The filter comes from `REWIND_LOG` when set (standard `EnvFilter`
//! directives), otherwise from the level passed in.

use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "REWIND_LOG";

/// Install a global fmt subscriber. Returns false if one was already set.
pub fn init(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
