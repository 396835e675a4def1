//! Structured JSON logging

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Filter from `RUST_LOG` when set, otherwise from the configured level
///
/// An unparsable `RUST_LOG` falls back to the configured level.
pub fn env_filter(config: &Config) -> EnvFilter {
    let level = config.service.effective_log_level();
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global JSON subscriber
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(config: &Config) -> Result<()> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter(config))
        .try_init()
        .map_err(|e| Error::Tracing(e.to_string()))?;

    tracing::info!(
        service = %config.service.name,
        environment = %config.service.environment,
        level = config.service.effective_log_level(),
        "Tracing initialized"
    );
    if config.service.debug {
        tracing::debug!("Debug mode enabled");
    }
    Ok(())
}
