//! xinetd backend — legacy superserver detection and service entries.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{ActivationEntry, CommandRunner};
use crate::domain::config::VigilConfig;
use crate::infra::fs::{atomic_write, remove_if_exists};

/// Manages the agent's xinetd service entry.
pub struct XinetdManager<R: CommandRunner> {
    runner: R,
    service: String,
    binary: PathBuf,
    xinetd_dir: PathBuf,
}

impl<R: CommandRunner> XinetdManager<R> {
    pub fn new(runner: R, config: &VigilConfig) -> Self {
        Self {
            runner,
            service: config.service.name.clone(),
            binary: config.service.binary.clone(),
            xinetd_dir: config.activation.xinetd_dir.clone(),
        }
    }

    /// Whether a superserver installation is present on this host.
    ///
    /// The entry directory is also where we would have to write, so its
    /// absence means legacy activation is unusable either way.
    #[must_use]
    pub fn present(&self) -> bool {
        self.xinetd_dir.is_dir()
    }

    fn entry_path(&self) -> PathBuf {
        self.xinetd_dir.join(&self.service)
    }

    /// Write the service entry and reload the superserver.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written atomically or the
    /// superserver cannot be reloaded.
    pub async fn enable(&self, entry: &ActivationEntry) -> Result<()> {
        let content = render_entry(&self.service, &self.binary.display().to_string(), entry.port);
        atomic_write(&self.entry_path(), &content).context("writing xinetd entry")?;
        self.reload().await
    }

    /// Remove the service entry if present. Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing entry cannot be removed or the
    /// superserver cannot be reloaded afterwards.
    pub async fn remove(&self) -> Result<bool> {
        if !remove_if_exists(&self.entry_path())? {
            return Ok(false);
        }
        self.reload().await?;
        Ok(true)
    }

    async fn reload(&self) -> Result<()> {
        // Prefer systemctl when xinetd itself runs under systemd; fall
        // back to the classic service wrapper.
        if let Ok(output) = self
            .runner
            .run("systemctl", &["try-reload-or-restart", "xinetd"])
            .await
            && output.status.success()
        {
            return Ok(());
        }
        let output = self
            .runner
            .run("service", &["xinetd", "reload"])
            .await
            .context("reloading xinetd")?;
        anyhow::ensure!(
            output.status.success(),
            "xinetd reload failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        Ok(())
    }
}

fn render_entry(service: &str, binary: &str, port: u16) -> String {
    format!(
        "service {service}\n\
         {{\n\
         \ttype        = UNLISTED\n\
         \tport        = {port}\n\
         \tsocket_type = stream\n\
         \tprotocol    = tcp\n\
         \twait        = no\n\
         \tuser        = root\n\
         \tserver      = {binary}\n\
         \tdisable     = no\n\
         }}\n"
    )
}
