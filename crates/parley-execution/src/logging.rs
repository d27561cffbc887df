//! Logging setup for processes embedding the engine.

use parley_core::{LoggingConfig, MemoryError, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides `config.level` when set. Output is JSON when
/// `config.json` is true.
///
/// # Errors
///
/// Returns [`MemoryError::Config`] for an invalid filter directive or when a
/// global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level, std::env::var(EnvFilter::DEFAULT_ENV).ok())?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    installed.map_err(|e| MemoryError::config(format!("failed to install logging: {e}")))
}

fn build_filter(level: &str, env_directive: Option<String>) -> Result<EnvFilter> {
    let directive = env_directive
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| level.to_string());
    EnvFilter::try_new(&directive)
        .map_err(|e| MemoryError::config(format!("invalid log filter '{directive}': {e}")))
}
