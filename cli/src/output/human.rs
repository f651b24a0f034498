//! Human-readable terminal renderer.

use crate::application::ports::InspectionReport;
use crate::application::services::deploy::DeployReport;
use crate::domain::transport::{DeploymentOutcome, HostCapability};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the result of a deploy run.
    pub fn render_deploy(&self, report: &DeployReport) {
        self.ctx.kv("Capability:", &report.capability.to_string());
        self.ctx.kv(
            "Connections:",
            &report.existing_connections.to_string(),
        );
        if report.malformed_records > 0 {
            self.ctx.warn(&format!(
                "{} malformed record(s) skipped",
                report.malformed_records
            ));
        }
        match &report.outcome {
            DeploymentOutcome::Abort { reason } => self.ctx.error(reason),
            outcome => self.ctx.kv("Outcome:", &outcome.to_string()),
        }
        if let Some(port) = report.port {
            self.ctx.kv("Port:", &port.to_string());
        }
        if !report.applied && !matches!(report.outcome, DeploymentOutcome::Abort { .. }) {
            self.ctx.info("no host configuration was changed");
        }
    }

    /// Render the probed host capability.
    pub fn render_capability(&self, capability: HostCapability) {
        self.ctx.kv("Capability:", &capability.to_string());
    }

    /// Render the inspected connection registry.
    pub fn render_connections(&self, report: &InspectionReport) {
        if report.connections.is_empty() {
            self.ctx.info("no registered connections");
        }
        for conn in &report.connections {
            let mode = match (conn.registration, conn.encrypted) {
                (true, _) => "registered",
                (false, true) => "encrypted",
                (false, false) => "legacy",
            };
            self.ctx.kv(&conn.endpoint, mode);
        }
        if report.malformed > 0 {
            self.ctx.warn(&format!(
                "{} malformed record(s) skipped",
                report.malformed
            ));
        }
    }
}
