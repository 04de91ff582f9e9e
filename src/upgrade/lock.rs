// ABOUTME: Per-machine lock preventing two workflows from cycling the same machine at once.
// ABOUTME: Process-local; the controller stays the arbiter across processes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::types::SystemId;

use super::error::UpgradeError;

/// Information about a held machine lock.
#[derive(Debug, Clone)]
pub struct LockInfo {
    /// Hostname of the machine running the workflow.
    pub holder: String,
    /// Process ID of the lock holder.
    pub pid: u32,
    /// When the lock was acquired.
    pub started_at: DateTime<Utc>,
}

impl LockInfo {
    fn new() -> Self {
        Self {
            holder: gethostname::gethostname().to_string_lossy().into_owned(),
            pid: std::process::id(),
            started_at: Utc::now(),
        }
    }
}

/// Registry of machines with a workflow in flight.
///
/// Acquisition fails fast instead of queueing: a second redeploy of a machine
/// that is mid-release would act on stale state.
#[derive(Debug, Default)]
pub struct MachineLocks {
    held: Mutex<HashMap<SystemId, LockInfo>>,
}

impl MachineLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `system_id`, released when the guard drops.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::AlreadyInProgress` if the machine is locked.
    pub fn try_acquire(&self, system_id: &SystemId) -> Result<MachineGuard<'_>, UpgradeError> {
        let mut held = self.held.lock();
        if let Some(existing) = held.get(system_id) {
            return Err(UpgradeError::AlreadyInProgress {
                system_id: system_id.clone(),
                holder: existing.holder.clone(),
                pid: existing.pid,
                started_at: existing.started_at,
            });
        }

        held.insert(system_id.clone(), LockInfo::new());
        Ok(MachineGuard {
            locks: self,
            system_id: system_id.clone(),
        })
    }

    /// Lock info for `system_id`, if held.
    pub fn holder(&self, system_id: &SystemId) -> Option<LockInfo> {
        self.held.lock().get(system_id).cloned()
    }
}

/// A held machine lock that releases on drop.
#[derive(Debug)]
pub struct MachineGuard<'a> {
    locks: &'a MachineLocks,
    system_id: SystemId,
}

impl Drop for MachineGuard<'_> {
    fn drop(&mut self) {
        self.locks.held.lock().remove(&self.system_id);
    }
}
