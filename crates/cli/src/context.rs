//! Shared state of a CLI invocation

use admin::adapter::Fixture;
use anyhow::Context as _;
use shared::ClmConfig;
use std::path::{Path, PathBuf};

/// Loaded configuration plus global flags
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub config: ClmConfig,
    pub json: bool,
}

impl Context {
    pub fn new(config: ClmConfig, json: bool) -> Self {
        Self { config, json }
    }

    /// Organization from `--org` or the configured default
    pub fn org(&self, explicit: Option<&str>) -> anyhow::Result<String> {
        Ok(self.config.resolve_org(explicit)?)
    }

    /// Load the fixture from `--fixture` or the configured path
    pub fn fixture(&self, explicit: Option<&Path>) -> anyhow::Result<Fixture> {
        let path: PathBuf = explicit
            .map(Path::to_path_buf)
            .or_else(|| self.config.fixture.clone())
            .context("no fixture given; pass --fixture or set \"fixture\" in the config")?;

        Fixture::from_file(&path).with_context(|| format!("loading fixture {}", path.display()))
    }
}

/// Split a comma separated list, dropping blanks
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
