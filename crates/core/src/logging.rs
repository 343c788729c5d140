//! Logging initialization.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "info,lightlab=debug,wgpu=warn,naga=warn";

/// Initialize the logging system with tracing.
///
/// The filter comes from `RUST_LOG` when set, otherwise [`DEFAULT_FILTER`].
/// Calling this twice is harmless; the second registration is ignored.
///
/// # Example
/// ```
/// lightlab_core::init_logging();
/// tracing::info!("lightlab started");
/// ```
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .try_init();
}
