//! `wallsync schedule` handler

use anyhow::Result;

use wallsync::cli::ScheduleArgs;
use wallsync::display::Clock;
use wallsync::sync::upcoming_transitions;
use wallsync::{Config, SyncError};

use super::{fetch_playlist, format_instant};

pub fn handle(args: ScheduleArgs, config: &Config) -> Result<()> {
    let playlist = fetch_playlist(&args.source, config)?;
    let at = args.at.unwrap_or_else(|| config.clock().now_ms());
    let playable = playlist.playable_at(at);

    let transitions = match upcoming_transitions(&playable, at, args.count) {
        Ok(transitions) => transitions,
        Err(SyncError::EmptyPlaylist) => {
            println!("No content: wall '{}' has nothing to play", playlist.wall);
            return Ok(());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&transitions)?);
        return Ok(());
    }

    for transition in &transitions {
        println!(
            "{}  #{} {}",
            format_instant(transition.starts_at_ms),
            transition.index,
            transition.item_id
        );
    }
    Ok(())
}
