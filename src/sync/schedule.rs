//! Upcoming transitions for a wall.
//!
//! Walks forward from the synchronizer's answer for `now`, so a preview and a
//! live display never disagree about when an item starts.

use serde::Serialize;

use super::state::{compute_sync_state, item_ms, SyncError};
use crate::playlist::Playlist;

/// The start of one item in the rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub index: usize,
    pub item_id: String,
    /// Unix ms at which the item comes on screen
    pub starts_at_ms: i64,
}

/// The next `count` item starts strictly after `now_ms`.
pub fn upcoming_transitions(
    playlist: &Playlist,
    now_ms: i64,
    count: usize,
) -> Result<Vec<Transition>, SyncError> {
    let state = compute_sync_state(playlist, now_ms)?;
    let len = playlist.len();

    let mut index = state.current_index;
    let mut starts_at = state.cycle_anchor_ms - state.offset_ms as i64;
    let mut transitions = Vec::with_capacity(count);

    while transitions.len() < count {
        starts_at = starts_at.saturating_add(item_ms(&playlist.items[index]));
        index = (index + 1) % len;
        transitions.push(Transition {
            index,
            item_id: playlist.items[index].id.clone(),
            starts_at_ms: starts_at,
        });
    }

    Ok(transitions)
}
