//! Tracing setup for the `bac` binary.
//!
//! Events are written to stderr, keeping stdout for reports, JSON and CSV.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the subscriber at WARN
///
/// Config load notices stay quiet unless `--verbose` or `RUST_LOG` asks
/// for them.
pub fn init() {
    init_with_level("warn")
}

/// Install the subscriber with `default_level` as the fallback filter
///
/// A `RUST_LOG` directive such as `bac_core=debug` takes precedence.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route debug events from unit tests into the test harness output
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
