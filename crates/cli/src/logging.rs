//! Logging setup for the CLI.
//!
//! Logs go to stderr so that `--json` output on stdout stays machine-readable.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` wins when set, otherwise `log_level`
/// applies to this workspace's crates and everything else stays at `warn`.
fn build_filter(log_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(format!(
        "warn,investment_agent_core={log_level},investment_agent={log_level}"
    ))
}

/// Install the global fmt subscriber. Safe to call more than once.
pub fn init_logging(log_level: &str) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(build_filter(log_level))
        .with(fmt_layer)
        .try_init();
}
