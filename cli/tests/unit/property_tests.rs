//! Property-based tests for the transport decision engine.
//!
//! Uses `proptest` to verify the decision table's invariants across many
//! random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use vigil_cli::domain::transport::{
    DeploymentOutcome, DeploymentRequest, ExistingConnection, HostCapability, decide,
};

fn capability_strategy() -> impl Strategy<Value = HostCapability> {
    prop_oneof![
        Just(HostCapability::ModernActivation),
        Just(HostCapability::LegacyActivation),
        Just(HostCapability::Unsupported),
    ]
}

fn connection_strategy() -> impl Strategy<Value = ExistingConnection> {
    (
        "[a-z]{1,12}\\.example\\.com",
        1u16..,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(host, port, registration, encrypted)| ExistingConnection {
            endpoint: format!("{host}:{port}"),
            registration,
            encrypted,
        })
}

fn request_strategy() -> impl Strategy<Value = DeploymentRequest> {
    (any::<bool>(), "[a-z]{1,10}").prop_map(|(auto_registration, scope)| DeploymentRequest {
        auto_registration,
        scope,
    })
}

proptest! {
    /// Same inputs always produce the same outcome, for every input.
    #[test]
    fn prop_decide_is_total_and_deterministic(
        capability in capability_strategy(),
        connections in prop::collection::vec(connection_strategy(), 0..5),
        request in request_strategy(),
    ) {
        let first = decide(capability, &connections, &request);
        let second = decide(capability, &connections, &request);
        prop_assert_eq!(first, second);
    }

    /// The core safety invariant: a registered connection forbids the
    /// unencrypted legacy transport, whatever else the inputs say.
    #[test]
    fn prop_never_legacy_when_registered_connection_exists(
        capability in capability_strategy(),
        connections in prop::collection::vec(connection_strategy(), 0..5),
        request in request_strategy(),
    ) {
        let outcome = decide(capability, &connections, &request);
        if connections.iter().any(|c| c.registration) {
            prop_assert_ne!(outcome, DeploymentOutcome::EnableLegacyNetworkTransport);
        }
    }

    /// Aborts only ever happen because of a pre-existing connection.
    #[test]
    fn prop_abort_implies_existing_connection(
        capability in capability_strategy(),
        connections in prop::collection::vec(connection_strategy(), 0..5),
        request in request_strategy(),
    ) {
        let outcome = decide(capability, &connections, &request);
        if matches!(outcome, DeploymentOutcome::Abort { .. }) {
            prop_assert!(!connections.is_empty());
        }
    }

    /// Modern hosts asked to auto-register always get encrypted transport.
    #[test]
    fn prop_modern_registration_always_encrypted(
        connections in prop::collection::vec(connection_strategy(), 0..5),
        scope in "[a-z]{1,10}",
    ) {
        let request = DeploymentRequest { auto_registration: true, scope };
        let outcome = decide(HostCapability::ModernActivation, &connections, &request);
        prop_assert_eq!(outcome, DeploymentOutcome::EnableEncryptedRegisteredTransport);
    }
}
