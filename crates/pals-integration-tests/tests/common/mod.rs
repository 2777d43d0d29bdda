//! Shared helpers for the integration tests.

use tracing_subscriber::EnvFilter;

/// Route library `tracing` events to the test output.
///
/// Verbosity follows `RUST_LOG` (e.g. `RUST_LOG=pals_core=debug`). Safe to
/// call from every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
