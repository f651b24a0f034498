//! Tests for the `deploy` application service.
//!
//! All I/O goes through the mocks in `crate::mocks`; these tests pin the
//! mapping from decision outcomes to apply-side effects, the dry-run and
//! abort short-circuits, and port-divergence reporting.

#![allow(clippy::expect_used)]

use vigil_cli::application::ports::InspectionReport;
use vigil_cli::application::services::deploy::{DeployOptions, run_deploy};
use vigil_cli::domain::config::VigilConfig;
use vigil_cli::domain::transport::{DeploymentOutcome, DeploymentRequest, HostCapability};

use crate::mocks::{
    ActivationCall, CountingLock, FailingStore, FixedPortAllocator, NoopReporter,
    RecordingActivation, RecordingReporter, StaticProber, StaticStore,
};

fn options<'a, R: vigil_cli::application::ports::ProgressReporter>(
    reporter: &'a R,
    register: bool,
) -> DeployOptions<'a, R> {
    DeployOptions {
        reporter,
        request: DeploymentRequest {
            auto_registration: register,
            scope: "default".to_string(),
        },
        requested_port: None,
        dry_run: false,
    }
}

#[tokio::test]
async fn test_registration_on_modern_host_enables_encrypted_entry() {
    let activation = RecordingActivation::default();
    let lock = CountingLock::default();
    let report = run_deploy(
        &StaticProber(HostCapability::ModernActivation),
        &StaticStore::empty(),
        &activation,
        &FixedPortAllocator { grant: 6556 },
        &lock,
        &VigilConfig::default(),
        options(&NoopReporter, true),
    )
    .await
    .expect("deploy");

    assert_eq!(
        report.outcome,
        DeploymentOutcome::EnableEncryptedRegisteredTransport
    );
    assert!(report.applied);
    assert_eq!(report.port, Some(6556));
    assert_eq!(*lock.acquired.lock().expect("lock"), 1);
    assert_eq!(
        activation.calls.lock().expect("lock").as_slice(),
        &[ActivationCall::Enable {
            capability: HostCapability::ModernActivation,
            port: 6556,
            encrypted: true,
        }]
    );
}

#[tokio::test]
async fn test_explicit_legacy_enables_unencrypted_entry() {
    let activation = RecordingActivation::default();
    let report = run_deploy(
        &StaticProber(HostCapability::ModernActivation),
        &StaticStore::empty(),
        &activation,
        &FixedPortAllocator { grant: 6556 },
        &CountingLock::default(),
        &VigilConfig::default(),
        options(&NoopReporter, false),
    )
    .await
    .expect("deploy");

    assert_eq!(report.outcome, DeploymentOutcome::EnableLegacyNetworkTransport);
    assert_eq!(
        activation.calls.lock().expect("lock").as_slice(),
        &[ActivationCall::Enable {
            capability: HostCapability::ModernActivation,
            port: 6556,
            encrypted: false,
        }]
    );
}

#[tokio::test]
async fn test_abort_mutates_nothing_and_skips_the_lock() {
    let activation = RecordingActivation::default();
    let lock = CountingLock::default();
    let report = run_deploy(
        &StaticProber(HostCapability::LegacyActivation),
        &StaticStore::with_connection(true),
        &activation,
        &FixedPortAllocator { grant: 6556 },
        &lock,
        &VigilConfig::default(),
        options(&NoopReporter, true),
    )
    .await
    .expect("deploy");

    assert!(matches!(report.outcome, DeploymentOutcome::Abort { .. }));
    assert!(!report.applied);
    assert_eq!(report.port, None);
    assert!(activation.calls.lock().expect("lock").is_empty());
    assert_eq!(*lock.acquired.lock().expect("lock"), 0);
}

#[tokio::test]
async fn test_unsupported_host_removes_stale_entries() {
    let activation = RecordingActivation::default();
    let report = run_deploy(
        &StaticProber(HostCapability::Unsupported),
        &StaticStore::empty(),
        &activation,
        &FixedPortAllocator { grant: 6556 },
        &CountingLock::default(),
        &VigilConfig::default(),
        options(&NoopReporter, true),
    )
    .await
    .expect("deploy");

    assert_eq!(report.outcome, DeploymentOutcome::InstallWithoutNetworkExposure);
    assert!(report.applied);
    assert_eq!(report.port, None);
    assert_eq!(
        activation.calls.lock().expect("lock").as_slice(),
        &[ActivationCall::Disable]
    );
}

#[tokio::test]
async fn test_dry_run_decides_but_never_applies() {
    let activation = RecordingActivation::default();
    let lock = CountingLock::default();
    let reporter = NoopReporter;
    let mut opts = options(&reporter, true);
    opts.dry_run = true;

    let report = run_deploy(
        &StaticProber(HostCapability::ModernActivation),
        &StaticStore::empty(),
        &activation,
        &FixedPortAllocator { grant: 6556 },
        &lock,
        &VigilConfig::default(),
        opts,
    )
    .await
    .expect("deploy");

    assert_eq!(
        report.outcome,
        DeploymentOutcome::EnableEncryptedRegisteredTransport
    );
    assert!(!report.applied);
    assert!(activation.calls.lock().expect("lock").is_empty());
    assert_eq!(*lock.acquired.lock().expect("lock"), 0);
}

#[tokio::test]
async fn test_port_divergence_is_used_and_reported() {
    let activation = RecordingActivation::default();
    let reporter = RecordingReporter::default();
    let mut opts = options(&reporter, true);
    opts.requested_port = Some(6556);

    let report = run_deploy(
        &StaticProber(HostCapability::ModernActivation),
        &StaticStore::empty(),
        &activation,
        &FixedPortAllocator { grant: 6600 },
        &CountingLock::default(),
        &VigilConfig::default(),
        opts,
    )
    .await
    .expect("deploy");

    assert!(report.applied);
    assert_eq!(report.port, Some(6600));
    let warns = reporter.warns.lock().expect("lock").clone();
    assert!(
        warns.iter().any(|w| w.contains("6600") && w.contains("6556")),
        "expected divergence warning, got {warns:?}"
    );
}

#[tokio::test]
async fn test_malformed_record_count_propagates_to_the_report() {
    let reporter = RecordingReporter::default();
    let store = StaticStore(InspectionReport {
        connections: Vec::new(),
        malformed: 2,
    });
    let report = run_deploy(
        &StaticProber(HostCapability::ModernActivation),
        &store,
        &RecordingActivation::default(),
        &FixedPortAllocator { grant: 6556 },
        &CountingLock::default(),
        &VigilConfig::default(),
        options(&reporter, true),
    )
    .await
    .expect("deploy");

    assert_eq!(report.malformed_records, 2);
    let warns = reporter.warns.lock().expect("lock").clone();
    assert!(warns.iter().any(|w| w.contains('2')), "{warns:?}");
}

#[tokio::test]
async fn test_unreadable_registry_fails_the_run() {
    let result = run_deploy(
        &StaticProber(HostCapability::ModernActivation),
        &FailingStore,
        &RecordingActivation::default(),
        &FixedPortAllocator { grant: 6556 },
        &CountingLock::default(),
        &VigilConfig::default(),
        options(&NoopReporter, true),
    )
    .await;
    assert!(result.is_err());
}
