//! Structured logging setup.
//!
//! Events go to stderr so stdout carries only command output. `RUST_LOG`, when
//! set, overrides the level derived from `LOG_LEVEL`.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map a `LOG_LEVEL` name to a tracing level; unknown names fall back to INFO.
pub fn parse_level(name: &str) -> Level {
    match name.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" | "WARNING" => Level::WARN,
        "ERROR" | "CRITICAL" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(level_name: &str) {
    let level = parse_level(level_name);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
