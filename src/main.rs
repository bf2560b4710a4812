//! wallsync CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wallsync::cli::{Cli, Commands, ConfigCommands};
use wallsync::Config;

/// Log to stderr so stdout stays clean for render output.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_logging(&config.logging.level);

    match cli.command {
        Commands::State(args) => commands::state::handle(args, &config),
        Commands::Schedule(args) => commands::schedule::handle(args, &config),
        Commands::Run(args) => commands::run::handle(args, &config),
        Commands::Config(ConfigCommands::Show) => commands::config::handle_show(&config),
        Commands::Config(ConfigCommands::Init) => commands::config::handle_init(),
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
