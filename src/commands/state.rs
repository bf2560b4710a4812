//! `wallsync state` handler

use anyhow::Result;
use serde::Serialize;

use wallsync::cli::StateArgs;
use wallsync::display::Clock;
use wallsync::{compute_sync_state, Config, PlaylistItem, SyncError, SyncState};

use super::{fetch_playlist, format_instant};

#[derive(Serialize)]
struct StateReport<'a> {
    wall: &'a str,
    at_ms: i64,
    #[serde(flatten)]
    state: SyncState,
    item: &'a PlaylistItem,
}

pub fn handle(args: StateArgs, config: &Config) -> Result<()> {
    let playlist = fetch_playlist(&args.source, config)?;
    let at = args.at.unwrap_or_else(|| config.clock().now_ms());
    let playable = playlist.playable_at(at);

    let state = match compute_sync_state(&playable, at) {
        Ok(state) => state,
        Err(SyncError::EmptyPlaylist) => {
            println!("No content: wall '{}' has nothing to play", playlist.wall);
            return Ok(());
        }
    };
    let item = &playable.items[state.current_index];

    if args.json {
        let report = StateReport {
            wall: &playable.wall,
            at_ms: at,
            state,
            item,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("wall:   {}", playable.wall);
    println!("at:     {}", format_instant(at));
    println!(
        "item:   #{} {} ({}) {}",
        state.current_index, item.id, item.kind, item.media_ref
    );
    println!("offset: {}ms of {}ms", state.offset_ms, item.duration_ms());
    Ok(())
}
