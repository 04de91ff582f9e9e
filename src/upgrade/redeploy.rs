// ABOUTME: Release -> wait -> deploy orchestration for a single machine.
// ABOUTME: Each transition consumes self; any failure ends the run with no compensation.

use crate::controller::MachineOps;
use crate::types::SystemId;

use super::error::{UpgradeError, WorkflowStep};
use super::outcome::{DeployTarget, RedeployOutcome};
use super::readiness::{ReadinessPolicy, wait_until_ready};
use super::state::{Deployed, Idle, Ready, RedeployPhase, RedeployState, Released};

/// A redeploy in progress, parameterized by its current state.
///
/// A failed transition returns the error instead of a next state, so the
/// absorbing failure state is simply the `Err` arm. Nothing is rolled back: a
/// failure after release leaves the machine released but not deployed, and
/// re-running the workflow is the remedy.
#[derive(Debug)]
pub struct Redeploy<S> {
    system_id: SystemId,
    target: DeployTarget,
    _state: S,
}

impl<S> Redeploy<S> {
    fn transition<T: Default>(self) -> Redeploy<T> {
        Redeploy {
            system_id: self.system_id,
            target: self.target,
            _state: T::default(),
        }
    }

    pub fn system_id(&self) -> &SystemId {
        &self.system_id
    }

    pub fn target(&self) -> &DeployTarget {
        &self.target
    }
}

impl<S: RedeployState> Redeploy<S> {
    /// The phase the next transition will perform.
    pub fn next_phase(&self) -> RedeployPhase {
        S::NEXT
    }
}

impl Redeploy<Idle> {
    pub fn new(system_id: SystemId, target: DeployTarget) -> Self {
        Redeploy {
            system_id,
            target,
            _state: Idle,
        }
    }

    /// Release the machine.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::Upstream` if the controller rejects the release.
    #[must_use = "redeploy state must be used"]
    pub async fn release<C: MachineOps + ?Sized>(
        self,
        controller: &C,
        comment: &str,
    ) -> Result<Redeploy<Released>, UpgradeError> {
        tracing::info!("Releasing {} for image {}", self.system_id, self.target);
        controller
            .release_machine(&self.system_id, comment)
            .await
            .map_err(|e| UpgradeError::upstream(&self.system_id, WorkflowStep::Release, e))?;
        Ok(self.transition())
    }
}

impl Redeploy<Released> {
    /// Wait for the released machine to report Ready.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::DeadlineExceeded` or `UpgradeError::Upstream`.
    #[must_use = "redeploy state must be used"]
    pub async fn wait_ready<C: MachineOps + ?Sized>(
        self,
        controller: &C,
        policy: ReadinessPolicy,
    ) -> Result<Redeploy<Ready>, UpgradeError> {
        tracing::info!(
            "Released {}, waiting up to {:?} for it to become ready",
            self.system_id,
            policy.timeout
        );
        wait_until_ready(controller, &self.system_id, policy).await?;
        Ok(self.transition())
    }
}

impl Redeploy<Ready> {
    /// Deploy the machine with the target image.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::Upstream` if the controller rejects the deploy.
    #[must_use = "redeploy state must be used"]
    pub async fn deploy<C: MachineOps + ?Sized>(
        self,
        controller: &C,
    ) -> Result<Redeploy<Deployed>, UpgradeError> {
        tracing::info!("{} is ready, deploying {}", self.system_id, self.target);
        controller
            .deploy_machine(&self.system_id, &self.target.distro_series())
            .await
            .map_err(|e| UpgradeError::upstream(&self.system_id, WorkflowStep::Deploy, e))?;
        Ok(self.transition())
    }
}

impl Redeploy<Deployed> {
    pub fn finish(self) -> RedeployOutcome {
        RedeployOutcome::Redeploying {
            target: self.target,
        }
    }
}

/// Drive a redeploy from release to deploy.
pub async fn run<C: MachineOps + ?Sized>(
    controller: &C,
    system_id: SystemId,
    target: DeployTarget,
    release_comment: &str,
    policy: ReadinessPolicy,
) -> Result<RedeployOutcome, UpgradeError> {
    let outcome = Redeploy::new(system_id, target)
        .release(controller, release_comment)
        .await?
        .wait_ready(controller, policy)
        .await?
        .deploy(controller)
        .await?
        .finish();
    Ok(outcome)
}
