//! # Telemetry
//!
//! Tracing subscriber setup for host binaries.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is the embedding application's choice. [`init`] offers the conventional
//! setup: an env-filter driven fmt subscriber.

use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber filtered by `RUST_LOG`.
///
/// Falls back to `info` when `RUST_LOG` is unset. Safe to call more than
/// once; only the first call installs a subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
