//! Startup surface for services configured through the environment.
//!
//! Re-exports the configuration crate and provides the logging and
//! reporting helpers the `appenv` binary is built from.

/// Re-export for convenience.
pub use appenv_config as config;

pub mod report;

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Initialize logging with env_logger.
///
/// Binaries call this before loading the configuration so validation
/// progress is visible with `RUST_LOG=debug`.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER),
    )
    .format_timestamp_millis()
    .try_init();
}
