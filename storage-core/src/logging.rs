use std::env::{self, VarError};

use tracing_subscriber::EnvFilter;

use crate::config::RemoteStorageConfig;
use crate::error::{Error, Result};

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_filter`; a malformed value in
/// either is an error. Fails if a global subscriber is already installed.
pub fn init(config: &RemoteStorageConfig) -> Result<()> {
    let from_env = match env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => Some(directives),
        Err(VarError::NotPresent) => None,
        Err(e @ VarError::NotUnicode(_)) => {
            return Err(Error::Logging(format!("{}: {e}", EnvFilter::DEFAULT_ENV)));
        }
    };
    let filter = build_filter(from_env.as_deref(), config)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;
    tracing::debug!(filter = %config.log_filter, "logging initialized");
    Ok(())
}

fn build_filter(from_env: Option<&str>, config: &RemoteStorageConfig) -> Result<EnvFilter> {
    let (source, directives) = match from_env {
        Some(directives) => (EnvFilter::DEFAULT_ENV, directives),
        None => ("log_filter", config.log_filter.as_str()),
    };
    EnvFilter::try_new(directives)
        .map_err(|e| Error::Logging(format!("invalid {source} '{directives}': {e}")))
}
