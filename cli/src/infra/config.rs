//! Configuration loading — file discovery plus domain validation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::config::{VigilConfig, validate_config};

/// Default config location: `~/.vigil/config.yaml`.
fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".vigil").join("config.yaml"))
}

/// Load the configuration.
///
/// An explicit `path` must exist. The default path is optional — when it
/// is missing, built-in defaults apply (first-time install has no config).
///
/// # Errors
///
/// Returns an error if an explicitly given file is missing or unreadable,
/// if the YAML does not parse, or if validation rejects a value.
pub fn load_config(path: Option<&Path>) -> Result<VigilConfig> {
    let config = match path {
        Some(path) => parse_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => parse_file(&path)?,
            _ => VigilConfig::default(),
        },
    };
    validate_config(&config)?;
    Ok(config)
}

fn parse_file(path: &Path) -> Result<VigilConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("parsing config file {}", path.display()))
}
