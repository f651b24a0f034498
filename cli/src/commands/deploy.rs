//! Deploy command — decide the agent transport and apply it.

use anyhow::Result;
use clap::Args;

use crate::application::services::deploy::{DeployOptions, run_deploy};
use crate::domain::config::VigilConfig;
use crate::domain::transport::{DeploymentOutcome, DeploymentRequest};
use crate::infra::activation::HostActivation;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::connection_store::FileConnectionStore;
use crate::infra::lock::HostDeployLock;
use crate::infra::port_allocator::ScanPortAllocator;
use crate::infra::prober::HostProber;
use crate::infra::systemd::SystemdManager;
use crate::infra::xinetd::XinetdManager;
use crate::output::{HumanRenderer, OutputContext, TerminalReporter};

#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Request auto-registration (encrypted, registration-based transport)
    #[arg(long)]
    pub register: bool,

    /// Rule scope tag surfaced in abort messages
    #[arg(long, default_value = "default")]
    pub scope: String,

    /// Requested listen port (the granted port may differ)
    #[arg(long)]
    pub port: Option<u16>,

    /// Decide and report without touching host configuration
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the deploy command.
///
/// # Errors
///
/// Returns an error if the run fails, or if the decision engine aborted
/// the deployment (so rule rollouts fail loudly with a non-zero exit).
pub async fn run(
    ctx: &OutputContext,
    config: &VigilConfig,
    args: &DeployArgs,
    json: bool,
) -> Result<()> {
    let prober = HostProber::new(
        SystemdManager::new(TokioCommandRunner::default(), config),
        XinetdManager::new(TokioCommandRunner::default(), config),
    );
    let store = FileConnectionStore::new(config.registry.path.clone());
    let activation = HostActivation::new(
        SystemdManager::new(TokioCommandRunner::default(), config),
        XinetdManager::new(TokioCommandRunner::default(), config),
        config.service.name.clone(),
    );
    let lock = HostDeployLock::new(&config.state_dir, &config.service.name);
    let reporter = TerminalReporter::new(ctx);

    let report = run_deploy(
        &prober,
        &store,
        &activation,
        &ScanPortAllocator,
        &lock,
        config,
        DeployOptions {
            reporter: &reporter,
            request: DeploymentRequest {
                auto_registration: args.register,
                scope: args.scope.clone(),
            },
            requested_port: args.port,
            dry_run: args.dry_run,
        },
    )
    .await?;

    if json {
        println!("{}", crate::output::json::to_pretty(&report)?);
    } else {
        HumanRenderer::new(ctx).render_deploy(&report);
    }

    if matches!(report.outcome, DeploymentOutcome::Abort { .. }) {
        anyhow::bail!("deployment aborted");
    }
    Ok(())
}
