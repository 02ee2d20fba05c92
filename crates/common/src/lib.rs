//! Shared configuration and process setup.

mod environment;

pub use environment::{
    resolve_base_url, DeltaEnvironment, ParseEnvironmentError, BASE_URL_ENV, ENVIRONMENT_ENV,
};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
