//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never interleave with the progress line or
//! the JSON report on stdout. `RUST_LOG` overrides the default `warn` level.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
