//! Tracing setup for binaries embedding the server.

use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init() {
    init_with_default("info");
}

/// Like [`init`], with a caller-chosen filter for when `RUST_LOG` is unset.
pub fn init_with_default(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
