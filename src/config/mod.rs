// ABOUTME: Configuration types and parsing for maas-redeploy.yml.
// ABOUTME: Handles YAML parsing, file discovery, env var references, and validation.

mod init;
mod maas;
mod readiness;
mod value;

pub use init::init_config;
pub use maas::MaasConfig;
pub use readiness::ReadinessConfig;
pub use value::{ConfigValue, EnvRef};

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "maas-redeploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "maas-redeploy.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".maas-redeploy/config.yml";

pub const DEFAULT_RELEASE_COMMENT: &str = "Release by maas-redeploy";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub maas: MaasConfig,

    #[serde(default)]
    pub readiness: ReadinessConfig,

    #[serde(default = "default_release_comment")]
    pub release_comment: String,

    /// Maximum number of machines processed at once in batch mode.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_release_comment() -> String {
    DEFAULT_RELEASE_COMMENT.to_string()
}

fn default_concurrency() -> usize {
    4
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Reject values that would make the workflow spin or never start.
    pub fn validate(&self) -> Result<()> {
        if self.readiness.interval.is_zero() {
            return Err(Error::InvalidConfig(
                "readiness.interval must be greater than zero".to_string(),
            ));
        }

        if self.concurrency == 0 {
            return Err(Error::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }

        if let Some(url) = self.maas.url.as_inline()
            && !url.starts_with("http://")
        {
            return Err(Error::InvalidConfig(format!(
                "maas.url must be an http:// URL, got {}",
                url
            )));
        }

        Ok(())
    }
}
