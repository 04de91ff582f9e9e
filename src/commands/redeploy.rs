// ABOUTME: Redeploy command implementation.
// ABOUTME: Runs the upgrade workflow for each machine, several at once, and reports outcomes.

use futures::stream::{self, StreamExt};
use maas_redeploy::config::Config;
use maas_redeploy::controller::MaasClient;
use maas_redeploy::diagnostics::Diagnostics;
use maas_redeploy::error::{Error, Result};
use maas_redeploy::output::Output;
use maas_redeploy::types::SystemId;
use maas_redeploy::upgrade::{MachineLocks, UpgradeDecision};
use nonempty::NonEmpty;

/// Upgrade every machine in `system_ids` that has a newer image.
pub async fn redeploy(
    config: &Config,
    system_ids: NonEmpty<SystemId>,
    output: &mut Output,
) -> Result<()> {
    let client = MaasClient::from_config(&config.maas)?;
    let locks = MachineLocks::new();
    let decision = UpgradeDecision::new(&client)
        .policy(config.readiness.policy())
        .release_comment(config.release_comment.as_str())
        .locks(&locks);

    let total = system_ids.len();
    output.start_timer();
    output.progress(&format!("Checking {} machine(s) for image upgrades", total));

    let decision = &decision;
    let mut results = std::pin::pin!(
        stream::iter(system_ids)
            .map(|system_id| async move {
                let mut diag = Diagnostics::default();
                let outcome = decision.redeploy(&system_id, &mut diag).await;
                (system_id, outcome, diag)
            })
            .buffer_unordered(config.concurrency)
    );

    let mut failed = 0;
    while let Some((system_id, outcome, diag)) = results.next().await {
        for warning in diag.warnings() {
            output.warning(&format!("{}: {}", system_id, warning.message));
        }
        if outcome.is_failed() {
            failed += 1;
        }
        output.outcome(&system_id, &outcome);
    }

    if failed > 0 {
        return Err(Error::MachinesFailed { failed, total });
    }

    output.success("Redeploy complete!");
    Ok(())
}
