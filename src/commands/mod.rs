// ABOUTME: Command module aggregator for the maas-redeploy CLI.
// ABOUTME: Re-exports redeploy and check handlers plus shared argument parsing.

mod check;
mod redeploy;

pub use check::check;
pub use redeploy::redeploy;

use maas_redeploy::error::{Error, Result};
use maas_redeploy::output::Output;
use maas_redeploy::types::{SystemId, SystemIdError};
use nonempty::NonEmpty;

/// Validate system IDs from the command line, dropping duplicates.
pub fn parse_system_ids(raw: &[String], output: &Output) -> Result<NonEmpty<SystemId>> {
    let mut ids: Vec<SystemId> = Vec::with_capacity(raw.len());
    for value in raw {
        let id = SystemId::new(value)?;
        if ids.contains(&id) {
            output.warning(&format!("duplicate system_id {} ignored", id));
            continue;
        }
        ids.push(id);
    }

    NonEmpty::from_vec(ids).ok_or(Error::InvalidSystemId(SystemIdError::Empty))
}
