// ABOUTME: Per-machine upgrade workflow: inspect, resolve, then skip or redeploy.
// ABOUTME: Machine state and catalog are fetched fresh on every invocation.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::controller::{Controller, MachineState};
use crate::diagnostics::Diagnostics;
use crate::types::SystemId;

use super::error::{UpgradeError, WorkflowStep};
use super::lock::MachineLocks;
use super::outcome::{DeployTarget, RedeployOutcome};
use super::readiness::ReadinessPolicy;
use super::redeploy;
use super::resolver::{latest_in_family, parse_current};

/// What an upgrade of one machine would do, computed without side effects.
#[derive(Debug, Clone)]
pub struct UpgradePlan {
    pub machine: MachineState,
    pub latest_image: String,
}

impl UpgradePlan {
    pub fn needs_update(&self) -> bool {
        self.latest_image != self.machine.current_image
    }

    pub fn target(&self) -> DeployTarget {
        DeployTarget::new(&self.machine.os_family, &self.latest_image)
    }
}

/// Decides whether a machine needs a newer image and redeploys it if so.
pub struct UpgradeDecision<'a, C: ?Sized> {
    controller: &'a C,
    policy: ReadinessPolicy,
    release_comment: String,
    locks: Option<&'a MachineLocks>,
}

impl<'a, C: Controller + ?Sized> UpgradeDecision<'a, C> {
    pub fn new(controller: &'a C) -> Self {
        Self {
            controller,
            policy: ReadinessPolicy::default(),
            release_comment: crate::config::DEFAULT_RELEASE_COMMENT.to_string(),
            locks: None,
        }
    }

    pub fn policy(mut self, policy: ReadinessPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn release_comment(mut self, comment: impl Into<String>) -> Self {
        self.release_comment = comment.into();
        self
    }

    /// Serialize workflows per machine through `locks`.
    pub fn locks(mut self, locks: &'a MachineLocks) -> Self {
        self.locks = Some(locks);
        self
    }

    /// Fetch the machine and catalog and resolve the latest image.
    ///
    /// The catalog is only fetched when the current image parses.
    ///
    /// # Errors
    ///
    /// Returns `UpgradeError::Upstream` if either fetch fails.
    pub async fn plan(
        &self,
        system_id: &SystemId,
        diag: &mut Diagnostics,
    ) -> Result<UpgradePlan, UpgradeError> {
        let machine = self
            .controller
            .get_machine(system_id)
            .await
            .map_err(|e| UpgradeError::upstream(system_id, WorkflowStep::FetchMachine, e))?;
        tracing::info!(
            "{} is running image: {}/{}",
            system_id,
            machine.os_family,
            machine.current_image
        );

        // Malformed images resolve to themselves without a catalog fetch
        let latest_image = match parse_current(&machine.current_image, diag) {
            None => machine.current_image.clone(),
            Some(current) => {
                let catalog = self.controller.list_boot_resources().await.map_err(|e| {
                    UpgradeError::upstream(system_id, WorkflowStep::FetchCatalog, e)
                })?;
                latest_in_family(&current, &machine.current_image, &catalog)
            }
        };
        tracing::info!("Latest available image: {}", latest_image);

        Ok(UpgradePlan {
            machine,
            latest_image,
        })
    }

    /// Run the full workflow for one machine.
    ///
    /// Returns `NoUpdateNeeded` without touching the machine when it already
    /// runs the latest image of its family.
    ///
    /// # Errors
    ///
    /// Returns the first failure; a machine may be left released but not
    /// deployed if the failure happens after release.
    pub async fn evaluate(
        &self,
        system_id: &SystemId,
        diag: &mut Diagnostics,
    ) -> Result<RedeployOutcome, UpgradeError> {
        let _guard = match self.locks {
            Some(locks) => Some(locks.try_acquire(system_id)?),
            None => None,
        };

        let plan = self.plan(system_id, diag).await?;

        if !plan.needs_update() {
            tracing::info!("No new image available for {}. Skipping redeploy.", system_id);
            return Ok(RedeployOutcome::NoUpdateNeeded {
                current: plan.machine.current_image,
            });
        }

        let target = plan.target();
        tracing::info!("Redeploying {} with new image: {}", system_id, target);

        redeploy::run(
            self.controller,
            system_id.clone(),
            target,
            &self.release_comment,
            self.policy,
        )
        .await
    }

    /// Caller-facing redeploy: like [`evaluate`](Self::evaluate), with
    /// failures reported as [`RedeployOutcome::Failed`].
    ///
    /// A panic inside the workflow is reported as `UpgradeError::Unexpected`.
    pub async fn redeploy(&self, system_id: &SystemId, diag: &mut Diagnostics) -> RedeployOutcome {
        let result = AssertUnwindSafe(self.evaluate(system_id, diag))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(UpgradeError::Unexpected(panic_message(payload))));

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Redeploy of {} failed: {}", system_id, e);
                RedeployOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("workflow panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("workflow panicked: {}", message)
    } else {
        "workflow panicked".to_string()
    }
}
