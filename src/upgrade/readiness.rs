// ABOUTME: Polls a machine until it reports Ready or a deadline passes.
// ABOUTME: Fixed-interval polling on tokio's clock; a failed poll aborts the wait.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::controller::{ControllerError, MachineOps, MachineStatus};
use crate::types::SystemId;

use super::error::{UpgradeError, WorkflowStep};

/// Deadline and poll spacing for a readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Total time budget for the wait.
    pub timeout: Duration,
    /// Spacing between polls.
    pub interval: Duration,
}

impl ReadinessPolicy {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT, Self::DEFAULT_INTERVAL)
    }
}

/// Poll `fetch_status` until it returns [`MachineStatus::Ready`].
///
/// Polls immediately, then every `policy.interval`, never sleeping past the
/// deadline. Once the deadline is reached without a ready status the wait fails
/// with [`UpgradeError::DeadlineExceeded`]. A fetch error aborts the wait at
/// once; it is not retried.
///
/// Dropping the returned future cancels the wait.
pub async fn wait_until<F, Fut>(
    system_id: &SystemId,
    mut fetch_status: F,
    policy: ReadinessPolicy,
) -> Result<(), UpgradeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<MachineStatus, ControllerError>>,
{
    let start = Instant::now();
    let deadline = start + policy.timeout;

    while Instant::now() < deadline {
        let status = fetch_status()
            .await
            .map_err(|e| UpgradeError::upstream(system_id, WorkflowStep::WaitReady, e))?;

        tracing::debug!(
            "Checking if machine {} is ready... {} ({}s elapsed)",
            system_id,
            status,
            start.elapsed().as_secs()
        );

        if status.is_ready() {
            return Ok(());
        }

        let next_poll = (Instant::now() + policy.interval).min(deadline);
        tokio::time::sleep_until(next_poll).await;
    }

    Err(UpgradeError::DeadlineExceeded {
        system_id: system_id.clone(),
        elapsed: start.elapsed(),
    })
}

/// Wait for `system_id` to reach Ready by polling the controller.
pub async fn wait_until_ready<C: MachineOps + ?Sized>(
    controller: &C,
    system_id: &SystemId,
    policy: ReadinessPolicy,
) -> Result<(), UpgradeError> {
    wait_until(
        system_id,
        || async move { controller.get_machine(system_id).await.map(|m| m.status) },
        policy,
    )
    .await
}
