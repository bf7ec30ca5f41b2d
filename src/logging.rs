//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level, and `--verbose`
//! takes precedence over both.

use tracing_subscriber::EnvFilter;

use crate::error::{ChangelogError, Result};

/// Filter directive for the given configured level, verbosity and `RUST_LOG`
pub fn filter_directive(level: &str, verbose: bool, env: Option<&str>) -> String {
    if verbose {
        return "debug".to_string();
    }
    match env {
        Some(directive) if !directive.trim().is_empty() => directive.to_string(),
        _ => level.to_string(),
    }
}

/// Install the global subscriber, writing to stderr.
///
/// # Returns
/// * `Ok(())` - Subscriber installed
/// * `Err(ChangelogError::Config)` - Invalid filter directive or a subscriber is already set
pub fn init_logging(level: &str, verbose: bool) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(level, verbose, env.as_deref());
    let filter = EnvFilter::try_new(&directive).map_err(|e| {
        ChangelogError::config(format!("Invalid log filter '{}': {}", directive, e))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ChangelogError::config(format!("Cannot initialise logging: {}", e)))
}
