// ABOUTME: Results reported to the caller of a redeploy.
// ABOUTME: Serializes as {"status": "no_update_needed" | "redeploying" | "failed", ...}.

use serde::{Serialize, Serializer};
use std::fmt;

/// Image a machine is redeployed with, sent to MAAS as `os_family/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployTarget {
    pub os_family: String,
    pub image: String,
}

impl DeployTarget {
    pub fn new(os_family: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            os_family: os_family.into(),
            image: image.into(),
        }
    }

    /// The `distro_series` value for the deploy call.
    pub fn distro_series(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DeployTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os_family, self.image)
    }
}

impl Serialize for DeployTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of one redeploy invocation. Produced once, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RedeployOutcome {
    /// The machine already runs the newest image of its family.
    NoUpdateNeeded { current: String },
    /// Release, readiness wait, and deploy were all accepted.
    Redeploying { target: DeployTarget },
    /// The workflow aborted; the machine is left as the controller reports it.
    Failed { reason: String },
}

impl RedeployOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            RedeployOutcome::NoUpdateNeeded { .. } => "no_update_needed",
            RedeployOutcome::Redeploying { .. } => "redeploying",
            RedeployOutcome::Failed { .. } => "failed",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RedeployOutcome::Failed { .. })
    }
}
