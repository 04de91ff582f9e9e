// ABOUTME: MAAS controller connection settings.
// ABOUTME: API URL, API key reference, and per-request transport timeouts.

use super::ConfigValue;
use crate::error::{Error, Result};
use crate::types::ApiKey;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct MaasConfig {
    /// Base URL of the MAAS region, e.g. `http://maas.example.com:5240/MAAS`.
    pub url: ConfigValue,

    /// API key as `consumer_key:token_key:token_secret`.
    pub api_key: ConfigValue,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

impl MaasConfig {
    pub fn resolve_url(&self) -> Result<String> {
        let url = self.url.resolve()?;
        if !url.starts_with("http://") {
            return Err(Error::InvalidConfig(format!(
                "maas.url must be an http:// URL, got {}",
                url
            )));
        }
        Ok(url)
    }

    pub fn resolve_api_key(&self) -> Result<ApiKey> {
        let raw = self.api_key.resolve()?;
        ApiKey::parse(&raw).map_err(|e| {
            Error::InvalidConfig(format!("maas.api_key from {}: {}", self.api_key, e))
        })
    }
}
