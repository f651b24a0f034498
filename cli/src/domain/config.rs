//! Domain types and validators for vigil configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Config schema ─────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.vigil/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VigilConfig {
    /// Agent service identity and port.
    pub service: ServiceConfig,
    /// Activation policy and host paths.
    pub activation: ActivationConfig,
    /// Persisted connection registry written by the registration flow.
    pub registry: RegistryConfig,
    /// Directory for tool-owned state (deploy lockfiles).
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
}

/// Agent service identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Name used for the activation entry (unit / xinetd service name).
    #[serde(default = "default_service_name")]
    pub name: String,
    /// Path to the agent binary the activation entry executes.
    #[serde(default = "default_binary")]
    pub binary: PathBuf,
    /// Default listen port when the operator requests none.
    #[serde(default = "default_port")]
    pub default_port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            binary: default_binary(),
            default_port: default_port(),
        }
    }
}

/// Activation policy constants and host paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationConfig {
    /// Minimum systemd major version that counts as modern activation.
    /// Policy constant, deliberately configuration rather than code.
    #[serde(default = "default_min_systemd_major")]
    pub min_systemd_major: u32,
    /// Directory for systemd socket/service units.
    #[serde(default = "default_unit_dir")]
    pub unit_dir: PathBuf,
    /// Directory for xinetd service entries.
    #[serde(default = "default_xinetd_dir")]
    pub xinetd_dir: PathBuf,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            min_systemd_major: default_min_systemd_major(),
            unit_dir: default_unit_dir(),
            xinetd_dir: default_xinetd_dir(),
        }
    }
}

/// Location of the persisted connection registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// JSON file holding the array of connection records.
    #[serde(default = "default_registry_path")]
    pub path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_registry_path(),
        }
    }
}

fn default_service_name() -> String {
    "vigil-agent".to_string()
}

fn default_binary() -> PathBuf {
    PathBuf::from("/usr/bin/vigil-agent")
}

fn default_port() -> u16 {
    6556
}

fn default_min_systemd_major() -> u32 {
    220
}

fn default_unit_dir() -> PathBuf {
    PathBuf::from("/etc/systemd/system")
}

fn default_xinetd_dir() -> PathBuf {
    PathBuf::from("/etc/xinetd.d")
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("/var/lib/vigil/registered_connections.json")
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("/var/lib/vigil")
}

// ── Validators ────────────────────────────────────────────────────────────────

/// Validates a loaded configuration.
///
/// # Errors
///
/// Returns an error if the service name is empty or contains characters
/// unsafe for unit/file names, or if a port or version constant is zero.
pub fn validate_config(config: &VigilConfig) -> Result<()> {
    let name = &config.service.name;
    let name_ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !name_ok {
        return Err(ConfigError::InvalidValue {
            key: "service.name".to_string(),
            value: name.clone(),
            hint: "lowercase letters, digits and '-' only".to_string(),
        }
        .into());
    }
    if config.service.default_port == 0 {
        return Err(ConfigError::InvalidValue {
            key: "service.default_port".to_string(),
            value: "0".to_string(),
            hint: "must be 1-65535".to_string(),
        }
        .into());
    }
    if config.activation.min_systemd_major == 0 {
        return Err(ConfigError::InvalidValue {
            key: "activation.min_systemd_major".to_string(),
            value: "0".to_string(),
            hint: "must be at least 1".to_string(),
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ────────────────────────────────────────────────────────────────
