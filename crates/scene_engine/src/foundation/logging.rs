//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Respects `RUST_LOG`; defaults to `info` when unset.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Initialize the logging system at a fixed level, ignoring `RUST_LOG`
pub fn init_with_level(level: log::LevelFilter) {
    env_logger::Builder::new().filter_level(level).init();
}
