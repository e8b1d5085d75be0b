//! Logging setup.
//!
//! Everything goes to stderr so stdout only carries the interactive session.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

const FALLBACK_DIRECTIVE: &str = "warn";

/// Pick the filter directive: `RUST_LOG` wins over the configured level.
fn filter_directive(rust_log: Option<String>, cfg: &LoggingConfig) -> String {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| cfg.level.clone())
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter '{directive}' ({e}), falling back to '{FALLBACK_DIRECTIVE}'");
        EnvFilter::new(FALLBACK_DIRECTIVE)
    })
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging(cfg: &LoggingConfig) {
    let directive = filter_directive(std::env::var(EnvFilter::DEFAULT_ENV).ok(), cfg);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_filter(&directive))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();

    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
