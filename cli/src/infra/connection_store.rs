//! Infrastructure implementation of the `ConnectionStore` port.
//!
//! `FileConnectionStore` provides async reads of the JSON connection
//! registry using `tokio::task::spawn_blocking`. Parsing is tolerant per
//! record: one corrupt entry never hides the valid ones.

use std::path::PathBuf;

use anyhow::{Context, Result};
use vigil_common::{ConnectionRecord, validate_endpoint};

use crate::application::ports::{ConnectionStore, InspectionReport};
use crate::domain::transport::ExistingConnection;

/// Reads the connection registry written by the registration flow.
pub struct FileConnectionStore {
    path: PathBuf,
}

impl FileConnectionStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Synchronous read — used internally by `inspect` via `spawn_blocking`.
    fn inspect_sync(&self) -> Result<InspectionReport> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            // First-time install: no registry yet, nothing provisioned.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(InspectionReport::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading registry {}", self.path.display()));
            }
        };

        let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(&content) else {
            // The whole file is unusable; treat it as one malformed record
            // rather than failing the run.
            tracing::warn!(path = %self.path.display(), "connection registry is not a JSON array");
            return Ok(InspectionReport {
                connections: Vec::new(),
                malformed: 1,
            });
        };

        let mut report = InspectionReport::default();
        for value in values {
            match serde_json::from_value::<ConnectionRecord>(value) {
                Ok(record) if validate_endpoint(&record.endpoint).is_ok() => {
                    report.connections.push(ExistingConnection::from(&record));
                }
                Ok(record) => {
                    tracing::warn!(endpoint = %record.endpoint, "skipping record with invalid endpoint");
                    report.malformed += 1;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed connection record");
                    report.malformed += 1;
                }
            }
        }
        Ok(report)
    }
}

impl ConnectionStore for FileConnectionStore {
    async fn inspect(&self) -> Result<InspectionReport> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || FileConnectionStore::new(path).inspect_sync())
            .await
            .context("registry read task panicked")?
    }
}
