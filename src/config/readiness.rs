// ABOUTME: Readiness wait configuration between release and redeploy.
// ABOUTME: Overall deadline and poll interval with the stock 100s/5s defaults.

use crate::upgrade::ReadinessPolicy;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ReadinessConfig {
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
}

fn default_timeout() -> Duration {
    ReadinessPolicy::DEFAULT_TIMEOUT
}

fn default_interval() -> Duration {
    ReadinessPolicy::DEFAULT_INTERVAL
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        ReadinessConfig {
            timeout: default_timeout(),
            interval: default_interval(),
        }
    }
}

impl ReadinessConfig {
    pub fn policy(&self) -> ReadinessPolicy {
        ReadinessPolicy::new(self.timeout, self.interval)
    }
}
