// ABOUTME: Check command implementation.
// ABOUTME: Resolves the latest image per machine without releasing or deploying anything.

use maas_redeploy::config::Config;
use maas_redeploy::controller::MaasClient;
use maas_redeploy::diagnostics::Diagnostics;
use maas_redeploy::error::{Error, Result};
use maas_redeploy::output::Output;
use maas_redeploy::types::SystemId;
use maas_redeploy::upgrade::UpgradeDecision;
use nonempty::NonEmpty;

/// Report current and latest image for every machine in `system_ids`.
pub async fn check(config: &Config, system_ids: NonEmpty<SystemId>, output: &Output) -> Result<()> {
    let client = MaasClient::from_config(&config.maas)?;
    let decision = UpgradeDecision::new(&client);

    let total = system_ids.len();
    let mut failed = 0;
    let mut outdated = 0;

    for system_id in &system_ids {
        let mut diag = Diagnostics::default();
        match decision.plan(system_id, &mut diag).await {
            Ok(plan) => {
                if plan.needs_update() {
                    outdated += 1;
                }
                output.plan(system_id, &plan);
            }
            Err(e) => {
                failed += 1;
                output.error(&e.to_string());
            }
        }
        for warning in diag.warnings() {
            output.warning(&format!("{}: {}", system_id, warning.message));
        }
    }

    if failed > 0 {
        return Err(Error::MachinesFailed { failed, total });
    }

    output.success(&format!("{} of {} machine(s) can be upgraded", outdated, total));
    Ok(())
}
