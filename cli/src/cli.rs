//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::infra::config::load_config;
use crate::output::OutputContext;

/// Transport provisioning for the vigil monitoring agent
#[derive(Parser)]
#[command(
    name = "vigil",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the config file (default: ~/.vigil/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decide the agent transport and apply it on this host
    Deploy(commands::DeployArgs),

    /// Report the host's network-activation capability
    Probe,

    /// List persisted registered connections
    Connections,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            no_color,
            quiet,
            json,
            config,
            command,
        } = self;
        // JSON mode owns stdout; progress output would corrupt it.
        let ctx = OutputContext::new(no_color, quiet || json);
        match command {
            Command::Version => {
                commands::version::run(json);
                Ok(())
            }
            Command::Deploy(args) => {
                let config = load_config(config.as_deref())?;
                commands::deploy::run(&ctx, &config, &args, json).await
            }
            Command::Probe => {
                let config = load_config(config.as_deref())?;
                commands::probe::run(&ctx, &config, json).await
            }
            Command::Connections => {
                let config = load_config(config.as_deref())?;
                commands::connections::run(&ctx, &config, json).await
            }
        }
    }
}
