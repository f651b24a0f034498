//! Infrastructure implementation of the `ActivationConfigurator` port.
//!
//! `HostActivation` owns both concrete backends and dispatches on the
//! probed capability, keeping tooling specifics out of the application
//! layer.

use anyhow::Result;

use crate::application::ports::{ActivationConfigurator, ActivationEntry, CommandRunner};
use crate::domain::error::ApplyError;
use crate::domain::transport::HostCapability;
use crate::infra::systemd::SystemdManager;
use crate::infra::xinetd::XinetdManager;

/// Production activation configurator: systemd units for modern hosts,
/// xinetd entries for legacy ones.
pub struct HostActivation<R: CommandRunner> {
    systemd: SystemdManager<R>,
    xinetd: XinetdManager<R>,
    service: String,
}

impl<R: CommandRunner> HostActivation<R> {
    pub fn new(systemd: SystemdManager<R>, xinetd: XinetdManager<R>, service: String) -> Self {
        Self {
            systemd,
            xinetd,
            service,
        }
    }
}

impl<R: CommandRunner> ActivationConfigurator for HostActivation<R> {
    async fn enable(&self, capability: HostCapability, entry: &ActivationEntry) -> Result<()> {
        match capability {
            HostCapability::ModernActivation => self.systemd.enable(entry).await,
            HostCapability::LegacyActivation => self.xinetd.enable(entry).await,
            HostCapability::Unsupported => Err(ApplyError::NoActivationMechanism {
                service: self.service.clone(),
            }
            .into()),
        }
    }

    async fn disable(&self) -> Result<()> {
        // Clear both mechanisms; a host upgraded from xinetd to systemd can
        // carry stale entries for either.
        let removed_units = self.systemd.remove().await?;
        let removed_entry = self.xinetd.remove().await?;
        if removed_units || removed_entry {
            tracing::info!(service = %self.service, "removed stale network activation entries");
        }
        Ok(())
    }
}
