// ABOUTME: Snapshot types returned by the MAAS API.
// ABOUTME: Machine state, lifecycle status, and boot resource catalog entries.

use crate::types::SystemId;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Lifecycle state of a machine as reported by MAAS `status_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineStatus {
    New,
    Commissioning,
    Ready,
    Allocated,
    Deploying,
    Deployed,
    Releasing,
    DiskErasing,
    FailedDeployment,
    FailedReleasing,
    Broken,
    /// Any status this client does not know by name.
    Other(String),
}

impl MachineStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, MachineStatus::Ready)
    }

    pub fn as_str(&self) -> &str {
        match self {
            MachineStatus::New => "New",
            MachineStatus::Commissioning => "Commissioning",
            MachineStatus::Ready => "Ready",
            MachineStatus::Allocated => "Allocated",
            MachineStatus::Deploying => "Deploying",
            MachineStatus::Deployed => "Deployed",
            MachineStatus::Releasing => "Releasing",
            MachineStatus::DiskErasing => "Disk erasing",
            MachineStatus::FailedDeployment => "Failed deployment",
            MachineStatus::FailedReleasing => "Failed releasing",
            MachineStatus::Broken => "Broken",
            MachineStatus::Other(name) => name,
        }
    }
}

impl From<&str> for MachineStatus {
    fn from(name: &str) -> Self {
        match name {
            "New" => MachineStatus::New,
            "Commissioning" => MachineStatus::Commissioning,
            "Ready" => MachineStatus::Ready,
            "Allocated" => MachineStatus::Allocated,
            "Deploying" => MachineStatus::Deploying,
            "Deployed" => MachineStatus::Deployed,
            "Releasing" => MachineStatus::Releasing,
            "Disk erasing" => MachineStatus::DiskErasing,
            "Failed deployment" => MachineStatus::FailedDeployment,
            "Failed releasing" => MachineStatus::FailedReleasing,
            "Broken" => MachineStatus::Broken,
            other => MachineStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MachineStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(MachineStatus::from(name.as_str()))
    }
}

/// A fresh snapshot of one machine. Never cached between workflow runs.
#[derive(Debug, Clone, Deserialize)]
pub struct MachineState {
    pub system_id: SystemId,

    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(rename = "status_name")]
    pub status: MachineStatus,

    /// Operating system family, e.g. `ubuntu` or `custom`.
    #[serde(rename = "osystem", default)]
    pub os_family: String,

    /// Version-suffixed image name the machine currently runs.
    #[serde(rename = "distro_series", default)]
    pub current_image: String,
}

/// One image available on the controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageCatalogEntry {
    #[serde(default)]
    pub name: String,
}

impl ImageCatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
