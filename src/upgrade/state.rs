// ABOUTME: Redeploy state marker types for the type state pattern.
// ABOUTME: Zero-sized types enforce release -> wait -> deploy ordering at compile time.

use std::fmt;

/// Observable phase of a redeploy, used for logging and failure reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeployPhase {
    Releasing,
    WaitingReady,
    Deploying,
    Done,
}

impl fmt::Display for RedeployPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RedeployPhase::Releasing => "releasing",
            RedeployPhase::WaitingReady => "waiting for ready",
            RedeployPhase::Deploying => "deploying",
            RedeployPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Implemented by every state marker.
pub trait RedeployState {
    /// The phase the next transition from this state performs.
    const NEXT: RedeployPhase;
}

/// Initial state: machine still deployed with its old image.
/// Available actions: `release()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

/// Released: controller accepted the release.
/// Available actions: `wait_ready()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Released;

/// Ready: machine observed in the Ready state.
/// Available actions: `deploy()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Ready;

/// Deployed: controller accepted the deploy with the new image.
/// Available actions: `finish()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Deployed;

impl RedeployState for Idle {
    const NEXT: RedeployPhase = RedeployPhase::Releasing;
}

impl RedeployState for Released {
    const NEXT: RedeployPhase = RedeployPhase::WaitingReady;
}

impl RedeployState for Ready {
    const NEXT: RedeployPhase = RedeployPhase::Deploying;
}

impl RedeployState for Deployed {
    const NEXT: RedeployPhase = RedeployPhase::Done;
}
