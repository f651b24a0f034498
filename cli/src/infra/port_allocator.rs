//! Infrastructure implementation of the `PortAllocator` port.

use anyhow::{Context, Result};

use crate::application::ports::PortAllocator;

/// How many consecutive ports to try before giving up.
const SCAN_RANGE: u16 = 100;

/// Picks the first bindable TCP port starting from the requested value
/// (or the service default when none was requested).
///
/// Stands in for the central port-allocation collaborator on hosts that
/// are provisioned standalone; callers must always use the granted port,
/// which may differ from the request.
pub struct ScanPortAllocator;

impl PortAllocator for ScanPortAllocator {
    async fn allocate(&self, service: &str, default: u16, requested: Option<u16>) -> Result<u16> {
        let start = requested.unwrap_or(default);
        let service = service.to_string();
        tokio::task::spawn_blocking(move || {
            for offset in 0..SCAN_RANGE {
                let Some(port) = start.checked_add(offset) else {
                    break;
                };
                if std::net::TcpListener::bind(("0.0.0.0", port)).is_ok() {
                    return Ok(port);
                }
            }
            anyhow::bail!(
                "no free port for '{service}' in {start}..{}",
                u32::from(start) + u32::from(SCAN_RANGE)
            )
        })
        .await
        .context("port scan task panicked")?
    }
}
