//! Logging setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr subscriber. RUST_LOG wins unless `verbose` is set.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed (tests calling run twice).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .try_init();
}
