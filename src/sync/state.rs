//! The synchronizer: which item a wall shows at a given instant.

use serde::Serialize;

use crate::playlist::{Playlist, PlaylistItem};

/// Errors from the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// No items, so there is no rotation cycle to place `now` in.
    #[error("Playlist has no content to rotate")]
    EmptyPlaylist,
}

/// Where in the rotation a wall is at a given second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncState {
    /// Index into the playlist of the item that should be on screen
    pub current_index: usize,
    /// Elapsed time within that item
    pub offset_ms: u64,
    /// `now` quantized down to the whole second (Unix ms)
    pub cycle_anchor_ms: i64,
    /// How many full cycles have completed since the Unix epoch
    pub cycle_number: i64,
}

/// Compute the authoritative rotation position for `now_ms` (Unix ms).
///
/// Pure function of its arguments. `now_ms` is quantized to whole seconds,
/// so any two displays evaluating within the same wall-clock second get an
/// identical result. An elapsed time landing exactly on an item boundary
/// belongs to the item that starts there.
pub fn compute_sync_state(playlist: &Playlist, now_ms: i64) -> Result<SyncState, SyncError> {
    if playlist.is_empty() {
        return Err(SyncError::EmptyPlaylist);
    }
    let total_ms = i64::try_from(playlist.total_duration_ms()).unwrap_or(i64::MAX);

    let base_time = now_ms.div_euclid(1000) * 1000;
    let elapsed = base_time.rem_euclid(total_ms);
    let cycle_number = base_time.div_euclid(total_ms);

    let mut accumulated = 0i64;
    for (index, item) in playlist.items.iter().enumerate() {
        let end = accumulated.saturating_add(item_ms(item));
        if elapsed < end {
            return Ok(SyncState {
                current_index: index,
                offset_ms: elapsed.abs_diff(accumulated),
                cycle_anchor_ms: base_time,
                cycle_number,
            });
        }
        accumulated = end;
    }

    // elapsed < total_ms, so the walk above always matches
    Ok(SyncState {
        current_index: 0,
        offset_ms: 0,
        cycle_anchor_ms: base_time,
        cycle_number,
    })
}

/// An item's slot length as signed milliseconds.
pub(crate) fn item_ms(item: &PlaylistItem) -> i64 {
    i64::try_from(item.duration_ms()).unwrap_or(i64::MAX)
}
