//! Full-screen TUI client for taskdeck.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod notices;
pub mod render;
pub mod routes;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use taskdeck_core::config::Config;

/// Runs the interactive client until the user quits.
pub async fn run(config: Config) -> Result<()> {
    // The client requires a terminal to render.
    if !stderr().is_terminal() {
        anyhow::bail!("taskdeck requires a terminal.");
    }

    let mut runtime = TuiRuntime::new(config)?;
    runtime.run().await
}
