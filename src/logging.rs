//! Diagnostics for the solver.
//!
//! Answers are the only thing written to stdout, so the runner's output can
//! be piped or diffed. Tracing goes to stderr and shows only warnings unless
//! `RUST_LOG` says otherwise.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the stderr subscriber, e.g. `RUST_LOG=patrol=debug patrol 2`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
