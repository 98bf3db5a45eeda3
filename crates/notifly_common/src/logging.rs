//! Logging utilities for the notifly services.
//!
//! This module provides a standardized approach to logging across all
//! crates in the workspace. It configures the tracing subscriber once at
//! process start; everything else logs through the `tracing` macros.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber with the default log level (INFO).
///
/// This function should be called at the start of the application to set up
/// logging. The `RUST_LOG` environment variable still takes precedence over
/// the default directive.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// # Arguments
///
/// * `level` - The minimum log level to display for workspace crates.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("notifly={}", level).parse().expect("valid directive"));

    // Use try_init so a second call (e.g. from tests) is a no-op instead
    // of a panic.
    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
