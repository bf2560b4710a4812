//! Wall playlists and where they come from.
//!
//! A playlist is the ordered rotation of media items shared by every display
//! of a wall. Each display fetches it independently from a [`PlaylistSource`]
//! and feeds it to the synchronizer; nothing here is stateful.
//!
//! # Module Structure
//!
//! - [`item`] - `PlaylistItem` and `MediaKind`
//! - [`error`] - `PlaylistError`
//! - [`source`] - the `PlaylistSource` trait and source selection
//! - `sources/` - file and HTTP implementations

mod error;
mod item;
mod source;
pub mod sources;

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::PlaylistError;
pub use item::{MediaKind, PlaylistItem, DEFAULT_ITEM_DURATION_SECS, MAX_ITEM_DURATION_MS};
pub use source::{source_for, PlaylistSource};

/// Wall name used for playlists that don't declare one.
pub const DEFAULT_WALL: &str = "default";

/// Ordered rotation of items for one wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default = "default_wall")]
    pub wall: String,
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

fn default_wall() -> String {
    DEFAULT_WALL.to_string()
}

/// Accepted document shapes: a full `{wall, items}` document or a bare item list.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlaylistDocument {
    Full(Playlist),
    Items(Vec<PlaylistItem>),
}

impl PlaylistDocument {
    fn into_playlist(self) -> Playlist {
        let playlist = match self {
            PlaylistDocument::Full(playlist) => playlist,
            PlaylistDocument::Items(items) => Playlist::new(DEFAULT_WALL, items),
        };
        playlist.into_rotation_order()
    }
}

impl Playlist {
    pub fn new(wall: impl Into<String>, items: Vec<PlaylistItem>) -> Self {
        Self {
            wall: wall.into(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistItem> {
        self.items.get(index)
    }

    /// Sum of every item's effective duration, in milliseconds (saturating).
    pub fn total_duration_ms(&self) -> u64 {
        self.items
            .iter()
            .map(PlaylistItem::duration_ms)
            .fold(0u64, u64::saturating_add)
    }

    /// Content hash used to tell whether a refetched playlist changed.
    ///
    /// Covers the wall and every field of every item, in rotation order.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.wall.hash(&mut hasher);
        self.items.len().hash(&mut hasher);
        for item in &self.items {
            item.id.hash(&mut hasher);
            item.kind.hash(&mut hasher);
            item.media_ref.hash(&mut hasher);
            item.duration_seconds.map(f64::to_bits).hash(&mut hasher);
            item.order.hash(&mut hasher);
            item.active.hash(&mut hasher);
            item.starts_at.hash(&mut hasher);
            item.ends_at.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Parse a JSON playlist document or bare item array.
    pub fn from_json_str(content: &str) -> Result<Self, PlaylistError> {
        let doc: PlaylistDocument = serde_json::from_str(content)?;
        Ok(doc.into_playlist())
    }

    /// Parse a TOML playlist document (`wall = ".."` plus `[[items]]` tables).
    pub fn from_toml_str(content: &str) -> Result<Self, PlaylistError> {
        let playlist: Playlist = toml::from_str(content)?;
        Ok(playlist.into_rotation_order())
    }

    /// Load a playlist file; `.toml` files are parsed as TOML, anything else as JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PlaylistError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PlaylistError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Stable sort by explicit `order`; unordered items go last in input order.
    fn into_rotation_order(mut self) -> Self {
        self.items
            .sort_by_key(|item| (item.order.is_none(), item.order.unwrap_or_default()));
        self
    }

    /// The subset of items eligible to play at `now_ms`.
    ///
    /// The instant is quantized to whole seconds first, so every display of a
    /// wall evaluating within the same second filters identically.
    pub fn playable_at(&self, now_ms: i64) -> Playlist {
        let base_secs = now_ms.div_euclid(1000);
        let at = DateTime::<Utc>::from_timestamp(base_secs, 0).unwrap_or_default();
        Playlist {
            wall: self.wall.clone(),
            items: self
                .items
                .iter()
                .filter(|item| item.is_playable_at(at))
                .cloned()
                .collect(),
        }
    }

    /// Reject playlists addressed to another wall.
    pub fn ensure_wall(&self, expected: &str) -> Result<(), PlaylistError> {
        if self.wall == expected {
            Ok(())
        } else {
            Err(PlaylistError::WallMismatch {
                expected: expected.to_string(),
                found: self.wall.clone(),
            })
        }
    }
}
