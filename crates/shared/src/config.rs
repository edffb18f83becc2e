//! Configuration types for CLM

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration (clm.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClmConfig {
    /// Default tracing filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Organization used when a command does not name one
    #[serde(default)]
    pub default_org: Option<String>,

    /// Fixture file seeding the in-memory stores
    #[serde(default)]
    pub fixture: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClmConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_org: None,
            fixture: None,
        }
    }
}

impl ClmConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration if a path is given, defaults otherwise
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolve the organization for a command, falling back to `default_org`
    pub fn resolve_org(&self, explicit: Option<&str>) -> crate::Result<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.default_org.clone())
            .ok_or_else(|| crate::ClmError::Config("no organization given and no defaultOrg configured".to_string()))
    }
}
