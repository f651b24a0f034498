//! Persisted connection records.
//!
//! The registration flow writes one record per agent-to-server connection
//! into the connection registry (a JSON array on disk). The deploy tool
//! only ever reads these records; it never creates or updates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A previously provisioned agent-to-server connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionRecord {
    /// Server identity as `host:port`.
    pub endpoint: String,
    /// Whether the connection was created via auto-registration.
    pub registration: bool,
    /// Whether the transport is encrypted.
    pub encrypted: bool,
    /// When the registration flow created this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
    /// Opaque reference to the credential/certificate material held by the
    /// registration flow. Never contains key material itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_ref: Option<String>,
}

/// Validation failures for a single connection record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionRecordError {
    #[error("invalid endpoint '{0}': expected host:port")]
    InvalidEndpoint(String),

    #[error("invalid port in endpoint '{0}': expected 1-65535")]
    InvalidPort(String),
}

/// Validates that an endpoint string is `host:port` with a non-zero port.
///
/// # Errors
///
/// Returns an error if the host part is empty, the separator is missing,
/// or the port is not in `1..=65535`.
pub fn validate_endpoint(endpoint: &str) -> Result<(), ConnectionRecordError> {
    let Some((host, port)) = endpoint.rsplit_once(':') else {
        return Err(ConnectionRecordError::InvalidEndpoint(endpoint.to_string()));
    };
    if host.is_empty() {
        return Err(ConnectionRecordError::InvalidEndpoint(endpoint.to_string()));
    }
    match port.parse::<u16>() {
        Ok(p) if p > 0 => Ok(()),
        _ => Err(ConnectionRecordError::InvalidPort(endpoint.to_string())),
    }
}
