//! Application service — the deploy use-case.
//!
//! One run walks a straight line: probe and inspect concurrently, decide,
//! then apply (or deliberately not). No outcome ever feeds back into
//! decision-making within a run.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::ports::{
    ActivationConfigurator, ActivationEntry, CapabilityProber, ConnectionStore, DeployLock,
    PortAllocator, ProgressReporter,
};
use crate::domain::config::VigilConfig;
use crate::domain::transport::{DeploymentOutcome, DeploymentRequest, HostCapability, decide};

/// Inputs for one deploy run.
pub struct DeployOptions<'a, R: ProgressReporter> {
    pub reporter: &'a R,
    pub request: DeploymentRequest,
    /// Operator-requested listen port; `None` means use the configured
    /// default. The allocator may grant a different port either way.
    pub requested_port: Option<u16>,
    /// Decide and report, but skip the apply step entirely.
    pub dry_run: bool,
}

/// What one deploy run found, decided, and did.
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    pub capability: HostCapability,
    pub existing_connections: usize,
    pub malformed_records: usize,
    pub outcome: DeploymentOutcome,
    /// Port the activation entry listens on, when one was configured.
    pub port: Option<u16>,
    /// Whether the apply step mutated host configuration.
    pub applied: bool,
}

/// Run the full deploy flow: probe + inspect, decide, apply.
///
/// Accepts port trait bounds so the caller can inject real or mock
/// implementations. The service never touches `OutputContext` or any
/// presentation type.
///
/// An `Abort` outcome is a successful run of the decision procedure — the
/// report carries the reason and `applied == false`; it is not an `Err`.
///
/// # Errors
///
/// Returns an error if the registry cannot be read, the host lock is
/// held by another deployment, port allocation fails, or the activation
/// configuration cannot be written.
pub async fn run_deploy(
    prober: &impl CapabilityProber,
    store: &impl ConnectionStore,
    activation: &impl ActivationConfigurator,
    ports: &impl PortAllocator,
    lock: &impl DeployLock,
    config: &VigilConfig,
    opts: DeployOptions<'_, impl ProgressReporter>,
) -> Result<DeployReport> {
    let reporter = opts.reporter;

    // Fan-out: prober and inspector have no mutual dependency. Each
    // returns an immutable snapshot before the decision is taken.
    reporter.step("probing host capability and inspecting existing connections...");
    let (capability, inspection) = tokio::join!(prober.probe(), store.inspect());
    let inspection = inspection.context("inspecting persisted connections")?;

    if inspection.malformed > 0 {
        reporter.warn(&format!(
            "skipped {} malformed connection record(s) in the registry",
            inspection.malformed
        ));
    }

    let outcome = decide(capability, &inspection.connections, &opts.request);
    tracing::info!(
        capability = %capability,
        existing_connections = inspection.connections.len(),
        malformed_records = inspection.malformed,
        auto_registration = opts.request.auto_registration,
        scope = %opts.request.scope,
        outcome = %outcome,
        "transport decision"
    );

    let mut report = DeployReport {
        capability,
        existing_connections: inspection.connections.len(),
        malformed_records: inspection.malformed,
        outcome: outcome.clone(),
        port: None,
        applied: false,
    };

    if let DeploymentOutcome::Abort { reason } = &outcome {
        reporter.warn(&format!("deployment aborted: {reason}"));
        return Ok(report);
    }

    if opts.dry_run {
        reporter.step(&format!("dry run: would {outcome}, skipping apply"));
        return Ok(report);
    }

    // The lock guard spans the entire mutation; concurrent deploys on the
    // same host wait out-of-process, not here.
    let _guard = lock.acquire().context("acquiring host deployment lock")?;

    match &outcome {
        DeploymentOutcome::EnableEncryptedRegisteredTransport
        | DeploymentOutcome::EnableLegacyNetworkTransport => {
            let encrypted =
                matches!(outcome, DeploymentOutcome::EnableEncryptedRegisteredTransport);
            let port = allocate_port(ports, config, opts.requested_port, reporter).await?;
            reporter.step(&format!(
                "writing network activation entry for port {port}..."
            ));
            activation
                .enable(capability, &ActivationEntry { port, encrypted })
                .await
                .context("writing activation configuration")?;
            report.port = Some(port);
        }
        DeploymentOutcome::InstallWithoutNetworkExposure => {
            reporter.step("removing any stale network activation entry...");
            activation
                .disable()
                .await
                .context("removing activation configuration")?;
        }
        DeploymentOutcome::Abort { .. } => unreachable!("abort returns before apply"),
    }

    report.applied = true;
    reporter.success(&format!("{outcome}"));
    Ok(report)
}

/// Allocate the listen port and surface any divergence from the request.
async fn allocate_port(
    ports: &impl PortAllocator,
    config: &VigilConfig,
    requested: Option<u16>,
    reporter: &impl ProgressReporter,
) -> Result<u16> {
    let wanted = requested.unwrap_or(config.service.default_port);
    let granted = ports
        .allocate(&config.service.name, config.service.default_port, requested)
        .await
        .context("allocating agent listen port")?;
    if granted != wanted {
        tracing::warn!(wanted, granted, "allocated port differs from requested");
        reporter.warn(&format!(
            "port {wanted} unavailable, using {granted} instead"
        ));
    }
    Ok(granted)
}
