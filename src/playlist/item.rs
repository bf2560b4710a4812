//! Playlist items and media kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Duration used when an item has no usable duration of its own.
pub const DEFAULT_ITEM_DURATION_SECS: f64 = 10.0;

/// Longest slot a single item can occupy: 366 days, in milliseconds.
///
/// Longer durations are clamped so cycle arithmetic stays inside `i64`
/// for any realistic number of items.
pub const MAX_ITEM_DURATION_MS: u64 = 366 * 24 * 60 * 60 * 1000;

/// What kind of media an item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image, shown for the item's duration
    Image,
    /// Video, free-runs until its own end event
    Video,
    /// Live widget (menu board, clock, promo ticker) identified by name
    Widget,
}

impl MediaKind {
    /// Whether rotation for this kind is driven by the item's duration.
    ///
    /// Videos advance on their own end event instead.
    pub fn is_duration_driven(&self) -> bool {
        !matches!(self, MediaKind::Video)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Widget => "widget",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn default_active() -> bool {
    true
}

/// A single entry of a wall's playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: String,
    #[serde(alias = "media_kind")]
    pub kind: MediaKind,
    /// URL of the asset, or the widget identifier
    #[serde(alias = "url", alias = "widget")]
    pub media_ref: String,
    /// Display time in seconds (may be fractional)
    #[serde(default, alias = "duration", skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Explicit rotation position; items without one keep their input order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Promotion window start (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    /// Promotion window end (exclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
}

impl PlaylistItem {
    pub fn new(id: impl Into<String>, kind: MediaKind, media_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            media_ref: media_ref.into(),
            duration_seconds: None,
            order: None,
            active: true,
            starts_at: None,
            ends_at: None,
        }
    }

    pub fn image(id: impl Into<String>, duration_seconds: f64) -> Self {
        let id = id.into();
        let media_ref = format!("https://cdn.invalid/{}.jpg", id);
        Self::new(id, MediaKind::Image, media_ref).with_duration(duration_seconds)
    }

    pub fn video(id: impl Into<String>, duration_seconds: f64) -> Self {
        let id = id.into();
        let media_ref = format!("https://cdn.invalid/{}.mp4", id);
        Self::new(id, MediaKind::Video, media_ref).with_duration(duration_seconds)
    }

    pub fn with_duration(mut self, duration_seconds: f64) -> Self {
        self.duration_seconds = Some(duration_seconds);
        self
    }

    /// Duration in seconds used for rotation.
    ///
    /// Unset, zero, negative and non-finite values fall back to
    /// [`DEFAULT_ITEM_DURATION_SECS`].
    pub fn effective_duration(&self) -> f64 {
        match self.duration_seconds {
            Some(secs) if secs.is_finite() && secs > 0.0 => secs,
            _ => DEFAULT_ITEM_DURATION_SECS,
        }
    }

    /// Effective duration in whole milliseconds, between 1 ms and
    /// [`MAX_ITEM_DURATION_MS`].
    pub fn duration_ms(&self) -> u64 {
        ((self.effective_duration() * 1000.0).round() as u64).clamp(1, MAX_ITEM_DURATION_MS)
    }

    /// Whether the item is eligible to play at the given instant.
    pub fn is_playable_at(&self, at: DateTime<Utc>) -> bool {
        if !self.active {
            return false;
        }
        if let Some(start) = self.starts_at {
            if at < start {
                return false;
            }
        }
        if let Some(end) = self.ends_at {
            if at >= end {
                return false;
            }
        }
        true
    }
}
