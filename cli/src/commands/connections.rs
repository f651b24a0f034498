//! Connections command — list persisted registered connections.

use anyhow::Result;

use crate::application::ports::ConnectionStore;
use crate::domain::config::VigilConfig;
use crate::infra::connection_store::FileConnectionStore;
use crate::output::{HumanRenderer, OutputContext};

/// Run the connections command.
///
/// # Errors
///
/// Returns an error if the registry exists but cannot be read.
pub async fn run(ctx: &OutputContext, config: &VigilConfig, json: bool) -> Result<()> {
    let store = FileConnectionStore::new(config.registry.path.clone());
    let report = store.inspect().await?;

    if json {
        println!("{}", crate::output::json::to_pretty(&report)?);
    } else {
        HumanRenderer::new(ctx).render_connections(&report);
    }
    Ok(())
}
