//! Probe command — report the host's activation capability.

use anyhow::Result;

use crate::application::ports::CapabilityProber;
use crate::domain::config::VigilConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::prober::HostProber;
use crate::infra::systemd::SystemdManager;
use crate::infra::xinetd::XinetdManager;
use crate::output::{HumanRenderer, OutputContext};

/// Run the probe command. The probe itself never fails; only output
/// serialization can.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub async fn run(ctx: &OutputContext, config: &VigilConfig, json: bool) -> Result<()> {
    let prober = HostProber::new(
        SystemdManager::new(TokioCommandRunner::default(), config),
        XinetdManager::new(TokioCommandRunner::default(), config),
    );
    let capability = prober.probe().await;

    if json {
        let obj = serde_json::json!({ "capability": capability });
        println!("{}", crate::output::json::to_pretty(&obj)?);
    } else {
        HumanRenderer::new(ctx).render_capability(capability);
    }
    Ok(())
}
