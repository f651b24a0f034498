//! Tests for the host capability prober.
//!
//! A scripted runner stands in for `systemctl`; xinetd presence is the
//! entry directory existing. Every failure path must degrade, never error.

#![allow(clippy::expect_used)]

use vigil_cli::application::ports::CapabilityProber;
use vigil_cli::domain::config::VigilConfig;
use vigil_cli::domain::transport::HostCapability;
use vigil_cli::infra::prober::HostProber;
use vigil_cli::infra::systemd::SystemdManager;
use vigil_cli::infra::xinetd::XinetdManager;

use crate::helpers::ok_output;
use crate::mocks::FakeRunner;

fn config_with_xinetd_dir(dir: Option<&std::path::Path>) -> VigilConfig {
    let mut config = VigilConfig::default();
    config.activation.xinetd_dir = match dir {
        Some(path) => path.to_path_buf(),
        None => std::path::PathBuf::from("/nonexistent/xinetd.d"),
    };
    config
}

fn prober(runner: &FakeRunner, config: &VigilConfig) -> HostProber<FakeRunner> {
    HostProber::new(
        SystemdManager::new(runner.clone(), config),
        XinetdManager::new(runner.clone(), config),
    )
}

#[tokio::test]
async fn test_recent_systemd_yields_modern_activation() {
    let config = config_with_xinetd_dir(None);
    let runner = FakeRunner::failing().with_response(
        "systemctl --version",
        ok_output(b"systemd 252 (252.22-1~deb12u1)\n+PAM +AUDIT\n"),
    );
    assert_eq!(
        prober(&runner, &config).probe().await,
        HostCapability::ModernActivation
    );
}

#[tokio::test]
async fn test_old_systemd_falls_through_to_superserver() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_with_xinetd_dir(Some(dir.path()));
    let runner = FakeRunner::failing()
        .with_response("systemctl --version", ok_output(b"systemd 208\n"));
    assert_eq!(
        prober(&runner, &config).probe().await,
        HostCapability::LegacyActivation
    );
}

#[tokio::test]
async fn test_unparsable_version_degrades() {
    let config = config_with_xinetd_dir(None);
    let runner = FakeRunner::failing()
        .with_response("systemctl --version", ok_output(b"no such thing\n"));
    assert_eq!(
        prober(&runner, &config).probe().await,
        HostCapability::Unsupported
    );
}

#[tokio::test]
async fn test_no_tooling_at_all_is_unsupported_not_an_error() {
    let config = config_with_xinetd_dir(None);
    let runner = FakeRunner::failing();
    assert_eq!(
        prober(&runner, &config).probe().await,
        HostCapability::Unsupported
    );
}

#[tokio::test]
async fn test_configured_minimum_is_honored() {
    let mut config = config_with_xinetd_dir(None);
    config.activation.min_systemd_major = 260;
    let runner = FakeRunner::failing()
        .with_response("systemctl --version", ok_output(b"systemd 252\n"));
    assert_eq!(
        prober(&runner, &config).probe().await,
        HostCapability::Unsupported
    );
}
