//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Apply errors ──────────────────────────────────────────────────────────────

/// Errors raised while materializing a deployment outcome on the host.
///
/// Anything in here is fatal to the current run: partial state has already
/// been rolled back by the time the error propagates.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("another deployment is already running on this host (lock '{path}' is held)")]
    LockHeld { path: String },

    #[error(
        "no activation mechanism available on this host; cannot expose '{service}' on the network"
    )]
    NoActivationMechanism { service: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value} ({hint})")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}
