// ABOUTME: Error types for the upgrade workflow.
// ABOUTME: Upstream call failures, readiness deadlines, and per-machine lock conflicts.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::controller::ControllerError;
use crate::types::SystemId;

/// The workflow step an upstream call belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    FetchMachine,
    FetchCatalog,
    Release,
    WaitReady,
    Deploy,
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStep::FetchMachine => "fetch machine",
            WorkflowStep::FetchCatalog => "fetch boot resources",
            WorkflowStep::Release => "release",
            WorkflowStep::WaitReady => "readiness poll",
            WorkflowStep::Deploy => "deploy",
        };
        f.write_str(name)
    }
}

/// Errors that abort a single machine's upgrade workflow.
#[derive(Debug, thiserror::Error)]
pub enum UpgradeError {
    /// The controller rejected or failed a call.
    #[error("{step} failed for {system_id}: {source}")]
    Upstream {
        system_id: SystemId,
        step: WorkflowStep,
        #[source]
        source: ControllerError,
    },

    /// The machine never reported ready within the readiness window.
    #[error("machine {system_id} did not become ready within {elapsed:?}")]
    DeadlineExceeded {
        system_id: SystemId,
        elapsed: Duration,
    },

    /// Another workflow in this process is already cycling the machine.
    #[error(
        "a redeploy of {system_id} is already in progress (held by {holder}, pid {pid}, since {started_at})"
    )]
    AlreadyInProgress {
        system_id: SystemId,
        holder: String,
        pid: u32,
        started_at: DateTime<Utc>,
    },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeErrorKind {
    UpstreamCallFailure,
    DeadlineExceeded,
    AlreadyInProgress,
    Unexpected,
}

impl UpgradeError {
    pub(crate) fn upstream(system_id: &SystemId, step: WorkflowStep, source: ControllerError) -> Self {
        UpgradeError::Upstream {
            system_id: system_id.clone(),
            step,
            source,
        }
    }

    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> UpgradeErrorKind {
        match self {
            UpgradeError::Upstream { .. } => UpgradeErrorKind::UpstreamCallFailure,
            UpgradeError::DeadlineExceeded { .. } => UpgradeErrorKind::DeadlineExceeded,
            UpgradeError::AlreadyInProgress { .. } => UpgradeErrorKind::AlreadyInProgress,
            UpgradeError::Unexpected(_) => UpgradeErrorKind::Unexpected,
        }
    }

    /// The step that failed, for upstream call failures.
    pub fn step(&self) -> Option<WorkflowStep> {
        match self {
            UpgradeError::Upstream { step, .. } => Some(*step),
            UpgradeError::DeadlineExceeded { .. } => Some(WorkflowStep::WaitReady),
            _ => None,
        }
    }
}
