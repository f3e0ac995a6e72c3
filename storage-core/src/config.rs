use std::path::Path;

use serde::{Deserialize, Serialize};
use storage_modules::RedefinePolicy;

use crate::error::Result;

/// Runtime settings for [`crate::RemoteStorage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteStorageConfig {
    /// What to do when a module name is defined twice.
    pub redefine: RedefinePolicy,
    /// `tracing_subscriber` filter directive used by [`crate::logging::init`].
    pub log_filter: String,
}

impl Default for RemoteStorageConfig {
    fn default() -> Self {
        Self {
            redefine: RedefinePolicy::Reject,
            log_filter: "info".into(),
        }
    }
}

impl RemoteStorageConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
