//! Infrastructure implementation of the `DeployLock` port.
//!
//! An exclusive flock keyed by service name, held for the duration of the
//! apply step. The flock is released when the guard (the open file) drops.

use std::path::PathBuf;

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::application::ports::DeployLock;
use crate::domain::error::ApplyError;

/// Host-scoped deployment lock.
///
/// The lockfile lives next to the state it protects so unprivileged runs
/// with a redirected state directory still work.
pub struct HostDeployLock {
    path: PathBuf,
}

impl HostDeployLock {
    #[must_use]
    pub fn new(state_dir: &std::path::Path, service: &str) -> Self {
        Self {
            path: state_dir.join(format!(".deploy-{service}.lock")),
        }
    }
}

impl DeployLock for HostDeployLock {
    fn acquire(&self) -> Result<Box<dyn std::any::Any + Send>> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating lock directory {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.path)
            .with_context(|| format!("opening lockfile {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = file.set_permissions(std::fs::Permissions::from_mode(0o600));
        }

        file.try_lock_exclusive().map_err(|_| ApplyError::LockHeld {
            path: self.path.display().to_string(),
        })?;
        Ok(Box::new(file))
    }
}
