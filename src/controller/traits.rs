// ABOUTME: Capability traits for the provisioning controller.
// ABOUTME: Injected into every workflow step so tests can substitute a fake.

use super::error::ControllerError;
use super::types::{ImageCatalogEntry, MachineState};
use crate::types::SystemId;
use async_trait::async_trait;

/// Machine lifecycle operations.
#[async_trait]
pub trait MachineOps: Send + Sync {
    /// Fetch a fresh snapshot of one machine.
    async fn get_machine(&self, system_id: &SystemId) -> Result<MachineState, ControllerError>;

    /// Release a machine back to the pool.
    async fn release_machine(
        &self,
        system_id: &SystemId,
        comment: &str,
    ) -> Result<(), ControllerError>;

    /// Deploy a machine with the given `os_family/image` distro series.
    async fn deploy_machine(
        &self,
        system_id: &SystemId,
        distro_series: &str,
    ) -> Result<(), ControllerError>;
}

/// Image catalog operations.
#[async_trait]
pub trait BootResourceOps: Send + Sync {
    /// List every boot resource the controller knows about.
    async fn list_boot_resources(&self) -> Result<Vec<ImageCatalogEntry>, ControllerError>;
}

/// Everything the upgrade workflow needs from the controller.
pub trait Controller: MachineOps + BootResourceOps {}

impl<T: MachineOps + BootResourceOps> Controller for T {}
