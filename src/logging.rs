//! Logging setup for the CLI using `tracing` and `tracing-subscriber`.
//!
//! The library only emits events; installing a subscriber is the binary's job.
//! Discovery reports missing folders at `warn`, the viewer traces transitions
//! at `debug`.
//!
//! # Log Levels
//!
//! - `warn`: missing project folders, empty galleries, refused viewer opens
//! - `info`: command progress
//! - `debug`: config/catalog loading, scan counts, viewer transitions
//! - `trace`: everything else
//!
//! `RUST_LOG` overrides the level chosen on the command line.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Map a `-v` count to a level: 0 → warn, 1 → info, 2 → debug, 3+ → trace.
pub fn level_from_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install a stderr fmt subscriber. Calling it twice is a no-op.
pub fn init_logging(level: Level) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(layer)
        .try_init()
        .ok();
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG`.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        // Dependencies stay at warn
        EnvFilter::new(format!("warn,portfolio_gal={level}"))
    })
}
