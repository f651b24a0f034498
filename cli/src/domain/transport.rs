//! Transport decision engine and the facts it consumes.
//!
//! `decide()` is the safety core of the deploy flow: a total, deterministic
//! mapping from host capability, pre-existing connections, and the requested
//! deployment mode to exactly one outcome. The fail-closed rules are
//! first-class match arms, not nested conditionals, so they can be read and
//! tested on their own.

use serde::Serialize;
use vigil_common::ConnectionRecord;

// ── Facts ─────────────────────────────────────────────────────────────────────

/// What the host's init system can do for on-demand network activation.
///
/// Computed once per deployment run by the prober and never revised
/// mid-run. A failed or ambiguous probe yields `Unsupported`, never an
/// error — weaker capability is informative input, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostCapability {
    /// Socket-activation-capable service manager at or above the
    /// configured minimum version.
    ModernActivation,
    /// Legacy inet-style superserver only.
    LegacyActivation,
    /// Neither mechanism usable.
    Unsupported,
}

impl std::fmt::Display for HostCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModernActivation => write!(f, "modern activation (systemd)"),
            Self::LegacyActivation => write!(f, "legacy activation (xinetd)"),
            Self::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Read-only snapshot of one previously provisioned connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExistingConnection {
    /// Server identity as `host:port`.
    pub endpoint: String,
    /// Created via auto-registration.
    pub registration: bool,
    /// Transport is encrypted.
    pub encrypted: bool,
}

impl From<&ConnectionRecord> for ExistingConnection {
    fn from(record: &ConnectionRecord) -> Self {
        Self {
            endpoint: record.endpoint.clone(),
            registration: record.registration,
            encrypted: record.encrypted,
        }
    }
}

/// The operator/rule input for one deployment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRequest {
    /// Whether auto-registration (encrypted transport) was requested.
    pub auto_registration: bool,
    /// Edition/tier tag of the rule that triggered this deploy. Opaque to
    /// the decision engine; surfaced in abort messages so the operator
    /// knows which rule to adjust.
    pub scope: String,
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Result of the decision. Exactly one variant per run; the config applier
/// consumes it and it is logged for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeploymentOutcome {
    /// Registration-based, encrypted transport via modern socket activation.
    EnableEncryptedRegisteredTransport,
    /// Unencrypted legacy network transport, explicitly chosen.
    EnableLegacyNetworkTransport,
    /// Agent installed, no network listener configured. Local invocation
    /// stays available.
    InstallWithoutNetworkExposure,
    /// Terminal refusal; `reason` is surfaced verbatim to the operator.
    Abort { reason: String },
}

impl std::fmt::Display for DeploymentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnableEncryptedRegisteredTransport => {
                write!(f, "enable encrypted registered transport")
            }
            Self::EnableLegacyNetworkTransport => write!(f, "enable legacy network transport"),
            Self::InstallWithoutNetworkExposure => write!(f, "install without network exposure"),
            Self::Abort { reason } => write!(f, "abort: {reason}"),
        }
    }
}

// ── Decision table ────────────────────────────────────────────────────────────

/// Decide the transport outcome for one deployment run.
///
/// Pure and total: no I/O, no randomness, every input combination maps to
/// exactly one outcome. Rules, first match wins:
///
/// 1. Legacy explicitly requested, but a registered connection already
///    exists → `Abort`. Network exposure without encryption is forbidden
///    whenever registration-based management is in effect.
/// 2. Legacy explicitly requested otherwise → `EnableLegacyNetworkTransport`.
/// 3. Auto-registration with modern activation →
///    `EnableEncryptedRegisteredTransport`.
/// 4. Auto-registration without modern activation:
///    a pre-existing connection blocks the silent fallback → `Abort`;
///    otherwise install with no listener at all.
#[must_use]
pub fn decide(
    capability: HostCapability,
    connections: &[ExistingConnection],
    request: &DeploymentRequest,
) -> DeploymentOutcome {
    let registered = connections.iter().find(|c| c.registration);

    match (request.auto_registration, capability) {
        (false, _) => match registered {
            Some(conn) => DeploymentOutcome::Abort {
                reason: format!(
                    "legacy transport refused: a registered connection to {} already \
                     exists; unregister it or enable auto-registration for rule scope '{}'",
                    conn.endpoint, request.scope
                ),
            },
            None => DeploymentOutcome::EnableLegacyNetworkTransport,
        },
        (true, HostCapability::ModernActivation) => {
            DeploymentOutcome::EnableEncryptedRegisteredTransport
        }
        (true, HostCapability::LegacyActivation | HostCapability::Unsupported) => {
            match connections.first() {
                Some(conn) => DeploymentOutcome::Abort {
                    reason: format!(
                        "legacy mode unsupported with pre-existing connection to {}: host \
                         capability is '{capability}'; adjust the rule for scope '{}' or \
                         remove the connection",
                        conn.endpoint, request.scope
                    ),
                },
                None => DeploymentOutcome::InstallWithoutNetworkExposure,
            }
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
