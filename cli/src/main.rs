//! Vigil CLI - transport provisioning for the vigil monitoring agent

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vigil_cli::cli::Cli;

#[tokio::main]
async fn main() {
    // Audit trail (decisions, degrades, port divergence) goes to stderr;
    // operator-facing progress uses the reporter on stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("VIGIL_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    if let Err(e) = cli.run().await {
        match vigil_cli::output::json::format_error(&format!("{e:#}"), "error") {
            Ok(body) if json => eprintln!("{body}"),
            _ => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}
