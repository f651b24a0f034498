//! Infrastructure implementation of the `CapabilityProber` port.

use crate::application::ports::{CapabilityProber, CommandRunner};
use crate::domain::transport::HostCapability;
use crate::infra::systemd::SystemdManager;
use crate::infra::xinetd::XinetdManager;

/// Probes the host init system, strongest mechanism first.
///
/// Every query is bounded by the runner's timeout; failure at any step
/// degrades to the next weaker capability rather than erroring out.
pub struct HostProber<R: CommandRunner> {
    systemd: SystemdManager<R>,
    xinetd: XinetdManager<R>,
}

impl<R: CommandRunner> HostProber<R> {
    pub fn new(systemd: SystemdManager<R>, xinetd: XinetdManager<R>) -> Self {
        Self { systemd, xinetd }
    }
}

impl<R: CommandRunner> CapabilityProber for HostProber<R> {
    async fn probe(&self) -> HostCapability {
        if self.systemd.supports_modern_activation().await {
            return HostCapability::ModernActivation;
        }
        if self.xinetd.present() {
            tracing::info!("modern activation unavailable, superserver detected");
            return HostCapability::LegacyActivation;
        }
        tracing::info!("no usable activation mechanism detected");
        HostCapability::Unsupported
    }
}
