//! Command-line interface definitions.
//!
//! Lives in the library so `xtask` can generate man pages from it.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

/// Version string with build metadata
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "-",
    env!("VERGEN_GIT_SHA"),
    " (",
    env!("WALLSYNC_BUILD_DATE"),
    ")"
);

/// Version string with build metadata
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("WALLSYNC_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "wallsync")]
#[command(version = VERSION)]
#[command(about = "Wall-clock synchronized playlist playback for media walls")]
#[command(
    long_about = "Every display of a media wall computes what to show from the playlist and \
the current wall-clock time alone. Displays never talk to each other; they agree because \
they all recompute from absolute time once per second."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which item a wall displays at a given instant
    State(StateArgs),

    /// List the upcoming item transitions of a wall
    Schedule(ScheduleArgs),

    /// Run one display, printing render instructions until interrupted
    Run(RunArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct StateArgs {
    /// Playlist file (JSON or TOML) or content API URL
    pub source: String,

    /// Instant to evaluate: RFC 3339 or Unix milliseconds (default: now)
    #[arg(long, value_parser = parse_instant)]
    pub at: Option<i64>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Playlist file (JSON or TOML) or content API URL
    pub source: String,

    /// Instant to start from: RFC 3339 or Unix milliseconds (default: now)
    #[arg(long, value_parser = parse_instant)]
    pub at: Option<i64>,

    /// Number of transitions to list
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Playlist file or content API URL (default: source.location from config)
    pub source: Option<String>,

    /// Wall this display belongs to (default: display.wall from config)
    #[arg(long)]
    pub wall: Option<String>,

    /// Print render instructions as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Milliseconds to add to the system clock
    #[arg(long, allow_hyphen_values = true)]
    pub clock_offset_ms: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Write a default configuration file if none exists
    Init,
}

/// Parse an instant given as RFC 3339 or integer Unix milliseconds.
pub fn parse_instant(value: &str) -> Result<i64, String> {
    if let Ok(ms) = value.parse::<i64>() {
        return Ok(ms);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc).timestamp_millis())
        .map_err(|e| format!("expected RFC 3339 or Unix milliseconds: {}", e))
}
