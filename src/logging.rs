//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs a formatted tracing subscriber honoring `RUST_LOG`, falling
/// back to `info`. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}
