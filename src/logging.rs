// src/logging.rs

//! Structured logging initialization: a compact, `RUST_LOG`-driven
//! `tracing-subscriber` setup.

use tracing_subscriber::EnvFilter;

/// Initializes the global `tracing` subscriber for normal (binary) use.
///
/// Safe to call more than once: subsequent calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_ansi(true)
        .try_init();
}
