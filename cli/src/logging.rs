//! Tracing subscriber setup.

use cmanifest_core::config::LogLevel;
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset: `-v` flags win over the config.
pub fn default_directive(verbose: u8, configured: LogLevel) -> &'static str {
    match verbose {
        0 => configured.as_filter(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global fmt subscriber on stderr.
pub fn init(verbose: u8, configured: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, configured))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
