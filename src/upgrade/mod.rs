// ABOUTME: Image upgrade decision and redeploy orchestration.
// ABOUTME: Resolver, readiness waiter, type state redeploy, and the per-machine workflow.

mod decision;
mod error;
mod lock;
mod outcome;
mod readiness;
mod redeploy;
mod resolver;
mod state;

pub use decision::{UpgradeDecision, UpgradePlan};
pub use error::{UpgradeError, UpgradeErrorKind, WorkflowStep};
pub use lock::{LockInfo, MachineGuard, MachineLocks};
pub use outcome::{DeployTarget, RedeployOutcome};
pub use readiness::{ReadinessPolicy, wait_until, wait_until_ready};
pub use redeploy::{Redeploy, run as run_redeploy};
pub use resolver::{latest_in_family, parse_current, resolve_latest};
pub use state::{Deployed, Idle, Ready, RedeployPhase, RedeployState, Released};
