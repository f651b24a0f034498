//! systemd backend — modern activation probing and socket-unit management.
//!
//! All host interaction goes through the `CommandRunner` port so the
//! backend can be exercised with a fake runner in tests.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{ActivationEntry, CommandRunner};
use crate::domain::config::VigilConfig;
use crate::infra::fs::{atomic_write, remove_if_exists};

/// Manages the agent's socket-activation units under one unit directory.
pub struct SystemdManager<R: CommandRunner> {
    runner: R,
    service: String,
    binary: PathBuf,
    unit_dir: PathBuf,
    min_major: u32,
}

impl<R: CommandRunner> SystemdManager<R> {
    pub fn new(runner: R, config: &VigilConfig) -> Self {
        Self {
            runner,
            service: config.service.name.clone(),
            binary: config.service.binary.clone(),
            unit_dir: config.activation.unit_dir.clone(),
            min_major: config.activation.min_systemd_major,
        }
    }

    /// Whether the host runs a systemd new enough for socket activation.
    ///
    /// Degrades to `false` on any failure: missing `systemctl`, timeout,
    /// unparsable version output, or a version below the policy minimum.
    pub async fn supports_modern_activation(&self) -> bool {
        let output = match self.runner.run("systemctl", &["--version"]).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(error = %e, "systemd version query failed, degrading");
                return false;
            }
        };
        if !output.status.success() {
            tracing::warn!("systemctl --version exited non-zero, degrading");
            return false;
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_systemd_major(&stdout) {
            Some(major) if major >= self.min_major => true,
            Some(major) => {
                tracing::warn!(
                    major,
                    min = self.min_major,
                    "systemd older than activation policy minimum"
                );
                false
            }
            None => {
                tracing::warn!("could not parse systemd version output, degrading");
                false
            }
        }
    }

    fn socket_unit_path(&self) -> PathBuf {
        self.unit_dir.join(format!("{}.socket", self.service))
    }

    fn service_unit_path(&self) -> PathBuf {
        self.unit_dir.join(format!("{}@.service", self.service))
    }

    /// Write the socket + templated service units and activate the socket.
    ///
    /// Unit files are written atomically; re-enabling with the same entry
    /// rewrites identical content and re-runs idempotent `systemctl` verbs.
    ///
    /// # Errors
    ///
    /// Returns an error if a unit cannot be written or systemd refuses to
    /// reload or enable the socket.
    pub async fn enable(&self, entry: &ActivationEntry) -> Result<()> {
        atomic_write(&self.socket_unit_path(), &render_socket_unit(&self.service, entry.port))
            .context("writing socket unit")?;
        atomic_write(
            &self.service_unit_path(),
            &render_service_unit(&self.binary.display().to_string(), entry.encrypted),
        )
        .context("writing service unit")?;

        self.daemon_reload().await?;

        let socket = format!("{}.socket", self.service);
        let output = self
            .runner
            .run("systemctl", &["enable", "--now", &socket])
            .await
            .context("enabling agent socket")?;
        anyhow::ensure!(
            output.status.success(),
            "systemctl enable --now {socket} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        Ok(())
    }

    /// Remove the agent units if present. Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing unit cannot be removed or the
    /// manager cannot be reloaded afterwards.
    pub async fn remove(&self) -> Result<bool> {
        let socket = format!("{}.socket", self.service);
        let removed_socket = remove_if_exists(&self.socket_unit_path())?;
        let removed_service = remove_if_exists(&self.service_unit_path())?;
        if !(removed_socket || removed_service) {
            return Ok(false);
        }
        // The socket may already be inactive; disable failures are not
        // actionable once the unit files are gone.
        let _ = self
            .runner
            .run("systemctl", &["disable", "--now", &socket])
            .await;
        self.daemon_reload().await?;
        Ok(true)
    }

    async fn daemon_reload(&self) -> Result<()> {
        let output = self
            .runner
            .run("systemctl", &["daemon-reload"])
            .await
            .context("reloading systemd")?;
        anyhow::ensure!(
            output.status.success(),
            "systemctl daemon-reload failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        Ok(())
    }
}

/// Parse the major version from `systemctl --version` output.
///
/// The first line looks like `systemd 252 (252.22-1~deb12u1)`; anything
/// else yields `None`.
#[must_use]
pub fn parse_systemd_major(output: &str) -> Option<u32> {
    let first_line = output.lines().next()?;
    let mut words = first_line.split_whitespace();
    if words.next()? != "systemd" {
        return None;
    }
    words.next()?.parse().ok()
}

fn render_socket_unit(service: &str, port: u16) -> String {
    format!(
        "[Unit]\n\
         Description=Vigil agent socket for {service}\n\
         \n\
         [Socket]\n\
         ListenStream={port}\n\
         Accept=yes\n\
         \n\
         [Install]\n\
         WantedBy=sockets.target\n"
    )
}

fn render_service_unit(binary: &str, encrypted: bool) -> String {
    let exec = if encrypted {
        format!("{binary} --registered")
    } else {
        binary.to_string()
    };
    format!(
        "[Unit]\n\
         Description=Vigil agent connection handler\n\
         \n\
         [Service]\n\
         ExecStart={exec}\n\
         StandardInput=socket\n\
         User=root\n"
    )
}
