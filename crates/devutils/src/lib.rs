//! Development utilities shared by demos and integration tests.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging output for a demo or test binary.
///
/// Filter defaults to `debug`, overridable through `RUST_LOG`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .finish();

    // Ignored if a subscriber is already installed, for tests sharing a binary
    let _ = tracing::subscriber::set_global_default(subscriber);
}
