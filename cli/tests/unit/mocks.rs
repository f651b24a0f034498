//! Shared mock infrastructure for unit tests.
//!
//! Provides canned port implementations so each test file doesn't have to
//! re-define the same boilerplate.

#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not every test module uses every mock

use std::collections::HashMap;
use std::process::Output;
use std::sync::Mutex;

use anyhow::Result;
use vigil_cli::application::ports::{
    ActivationConfigurator, ActivationEntry, CapabilityProber, CommandRunner, ConnectionStore,
    DeployLock, InspectionReport, PortAllocator, ProgressReporter,
};
use vigil_cli::domain::transport::{ExistingConnection, HostCapability};

use crate::helpers::{err_output, ok_output};

// ── Reporters ─────────────────────────────────────────────────────────────────

pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}

/// Records every message so tests can assert on progress output.
#[derive(Default)]
pub struct RecordingReporter {
    pub steps: Mutex<Vec<String>>,
    pub warns: Mutex<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.steps.lock().expect("lock").push(message.to_string());
    }
    fn success(&self, _: &str) {}
    fn warn(&self, message: &str) {
        self.warns.lock().expect("lock").push(message.to_string());
    }
}

// ── Probe and store mocks ─────────────────────────────────────────────────────

pub struct StaticProber(pub HostCapability);

impl CapabilityProber for StaticProber {
    async fn probe(&self) -> HostCapability {
        self.0
    }
}

pub struct StaticStore(pub InspectionReport);

impl StaticStore {
    pub fn empty() -> Self {
        Self(InspectionReport::default())
    }

    pub fn with_connection(registration: bool) -> Self {
        Self(InspectionReport {
            connections: vec![ExistingConnection {
                endpoint: "monitor.example.com:8000".to_string(),
                registration,
                encrypted: registration,
            }],
            malformed: 0,
        })
    }
}

impl ConnectionStore for StaticStore {
    async fn inspect(&self) -> Result<InspectionReport> {
        Ok(self.0.clone())
    }
}

pub struct FailingStore;

impl ConnectionStore for FailingStore {
    async fn inspect(&self) -> Result<InspectionReport> {
        anyhow::bail!("registry unreadable")
    }
}

// ── Apply mocks ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationCall {
    Enable {
        capability: HostCapability,
        port: u16,
        encrypted: bool,
    },
    Disable,
}

#[derive(Default)]
pub struct RecordingActivation {
    pub calls: Mutex<Vec<ActivationCall>>,
}

impl ActivationConfigurator for RecordingActivation {
    async fn enable(&self, capability: HostCapability, entry: &ActivationEntry) -> Result<()> {
        self.calls.lock().expect("lock").push(ActivationCall::Enable {
            capability,
            port: entry.port,
            encrypted: entry.encrypted,
        });
        Ok(())
    }

    async fn disable(&self) -> Result<()> {
        self.calls.lock().expect("lock").push(ActivationCall::Disable);
        Ok(())
    }
}

pub struct FixedPortAllocator {
    pub grant: u16,
}

impl PortAllocator for FixedPortAllocator {
    async fn allocate(&self, _: &str, _: u16, _: Option<u16>) -> Result<u16> {
        Ok(self.grant)
    }
}

/// Counts acquisitions so tests can assert the lock spans apply only.
#[derive(Default)]
pub struct CountingLock {
    pub acquired: Mutex<usize>,
}

impl DeployLock for CountingLock {
    fn acquire(&self) -> Result<Box<dyn std::any::Any + Send>> {
        *self.acquired.lock().expect("lock") += 1;
        Ok(Box::new(()))
    }
}

// ── Fake command runner ───────────────────────────────────────────────────────

/// Scripted `CommandRunner`: responses keyed by `"program arg1 arg2"`,
/// every invocation recorded.
///
/// Cloning shares the script and the call log, so a test can keep one
/// handle for assertions after moving the other into a manager.
#[derive(Clone)]
pub struct FakeRunner {
    inner: std::sync::Arc<FakeRunnerInner>,
}

struct FakeRunnerInner {
    responses: Mutex<HashMap<String, Output>>,
    calls: Mutex<Vec<String>>,
    default_ok: bool,
}

impl FakeRunner {
    /// All unscripted commands succeed with empty output.
    pub fn ok() -> Self {
        Self::with_default(true)
    }

    /// All unscripted commands fail.
    pub fn failing() -> Self {
        Self::with_default(false)
    }

    fn with_default(default_ok: bool) -> Self {
        Self {
            inner: std::sync::Arc::new(FakeRunnerInner {
                responses: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
                default_ok,
            }),
        }
    }

    #[must_use]
    pub fn with_response(self, command: &str, output: Output) -> Self {
        self.inner
            .responses
            .lock()
            .expect("lock")
            .insert(command.to_string(), output);
        self
    }

    pub fn recorded(&self) -> Vec<String> {
        self.inner.calls.lock().expect("lock").clone()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        let key = format!("{program} {}", args.join(" "));
        self.inner.calls.lock().expect("lock").push(key.clone());
        if let Some(output) = self.inner.responses.lock().expect("lock").get(&key) {
            return Ok(output.clone());
        }
        if self.inner.default_ok {
            Ok(ok_output(b""))
        } else {
            Ok(err_output(b"command failed"))
        }
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _: std::time::Duration,
    ) -> Result<Output> {
        self.run(program, args).await
    }
}
