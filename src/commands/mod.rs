//! Subcommand handlers

pub mod completions;
pub mod config;
pub mod run;
pub mod schedule;
pub mod state;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use wallsync::playlist::source_for;
use wallsync::{Config, Playlist};

/// Fetch a playlist once from a file path or URL.
pub fn fetch_playlist(location: &str, config: &Config) -> Result<Playlist> {
    let source = source_for(location, config.request_timeout())?;
    source
        .fetch()
        .with_context(|| format!("Failed to load playlist from {}", source.describe()))
}

/// RFC 3339 rendering of a Unix ms instant.
pub fn format_instant(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| ms.to_string())
}
