// ABOUTME: Provisioning controller (MAAS) collaborator: traits, types, and HTTP client.
// ABOUTME: The upgrade workflow only sees the traits; MaasClient is the production implementation.

mod client;
mod error;
mod oauth;
mod traits;
mod types;

pub use client::MaasClient;
pub use error::ControllerError;
pub use oauth::authorization_header;
pub use traits::{BootResourceOps, Controller, MachineOps};
pub use types::{ImageCatalogEntry, MachineState, MachineStatus};
