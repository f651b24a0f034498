//! Terminal implementation of the `ProgressReporter` port.
//!
//! Bridges the deploy service to the operator's terminal: each progress
//! event becomes one styled line on stdout. Quiet and `--json` runs set
//! `ctx.quiet`, which suppresses every line here.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Progress reporter for interactive deploy runs.
///
/// In-progress steps print as `  → {message}`; success and warning lines
/// delegate to `OutputContext` so deploy progress carries the same `✓`/`⚠`
/// glyphs as the rest of the command output.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.info));
        }
    }

    fn success(&self, message: &str) {
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        self.ctx.warn(message);
    }
}
