//! `wallsync completions` handler

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

use wallsync::cli::Cli;

pub fn handle(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "wallsync", &mut std::io::stdout());
    Ok(())
}
