//! Tracing setup for the `finance` binary
//!
//! Logs go to stderr so command output on stdout stays pipeable. `RUST_LOG`
//! overrides the level chosen from `--verbose`.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// The crate-level filter directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "finance_tracker=warn",
        1 => "finance_tracker=info",
        2 => "finance_tracker=debug",
        _ => "finance_tracker=trace",
    }
}

/// Initializes the global tracing subscriber. Later calls are no-ops.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
