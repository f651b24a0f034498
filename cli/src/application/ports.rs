//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::process::Output;

use anyhow::Result;
use serde::Serialize;

use crate::domain::transport::{ExistingConnection, HostCapability};

// ── Value Types ───────────────────────────────────────────────────────────────

/// What the inspector found in the persisted connection registry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InspectionReport {
    /// Successfully parsed connection records.
    pub connections: Vec<ExistingConnection>,
    /// Records skipped because they could not be parsed or validated.
    pub malformed: usize,
}

/// Parameters for one network-activation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationEntry {
    /// TCP port the activation entry listens on.
    pub port: u16,
    /// Whether the handler runs the agent in encrypted, registered mode.
    pub encrypted: bool,
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds
    /// `timeout`. On timeout, the child process must be killed (not left
    /// orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}

// ── Host Probe Ports ──────────────────────────────────────────────────────────

/// Detects the host's network-activation capability.
///
/// The probe is a pure read of host state and never fails: degraded or
/// missing tooling maps to a weaker capability, ultimately `Unsupported`.
#[allow(async_fn_in_trait)]
pub trait CapabilityProber {
    /// Probe the host once and return an immutable capability fact.
    async fn probe(&self) -> HostCapability;
}

/// Reads the persisted connection registry.
#[allow(async_fn_in_trait)]
pub trait ConnectionStore {
    /// Parse zero-or-more connection records. A missing registry yields an
    /// empty report; malformed individual records are skipped and counted.
    ///
    /// # Errors
    ///
    /// Returns an error only when the registry exists but cannot be read
    /// at all (I/O failure other than not-found).
    async fn inspect(&self) -> Result<InspectionReport>;
}

// ── Apply Ports ───────────────────────────────────────────────────────────────

/// Writes or removes the host's network-activation configuration.
///
/// Implementations must be idempotent: enabling the same entry twice, or
/// disabling twice, leaves identical on-disk state.
#[allow(async_fn_in_trait)]
pub trait ActivationConfigurator {
    /// Write the activation entry appropriate for `capability` and reload
    /// the service manager.
    ///
    /// # Errors
    ///
    /// Returns an error if no activation mechanism matches `capability`
    /// or the configuration cannot be written atomically.
    async fn enable(&self, capability: HostCapability, entry: &ActivationEntry) -> Result<()>;

    /// Remove any stale activation entry so the agent is not reachable
    /// over the network. Succeeds when there is nothing to remove.
    async fn disable(&self) -> Result<()>;
}

/// Supplies the next free TCP port for a named service.
///
/// The granted port may differ from the requested one; callers must use
/// the returned value and surface the divergence.
#[allow(async_fn_in_trait)]
pub trait PortAllocator {
    /// Choose a free port, preferring `requested` and falling back from
    /// `default`.
    ///
    /// # Errors
    ///
    /// Returns an error if no free port can be found.
    async fn allocate(&self, service: &str, default: u16, requested: Option<u16>) -> Result<u16>;
}

/// Host-scoped mutual exclusion around the apply step.
pub trait DeployLock {
    /// Acquire the lock, returning a guard that releases it on drop.
    ///
    /// # Errors
    ///
    /// Returns an error if another deployment currently holds the lock.
    fn acquire(&self) -> Result<Box<dyn std::any::Any + Send>>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
