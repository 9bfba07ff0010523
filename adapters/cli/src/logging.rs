//! Stderr tracing for run progress.
//!
//! Progress lines (level starts, goals reached) are diagnostics, not product
//! output: they go to stderr under `RUST_LOG` control while the final summary
//! stays on stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber for the process.
///
/// Reads `RUST_LOG` and defaults to `info` so per-level progress is visible
/// without any setup.
pub(crate) fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
