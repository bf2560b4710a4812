//! Per-display rotation state machine.
//!
//! The controller owns no timers. The runtime feeds it ticks, local
//! deadlines, playlist refetches and media events, and forwards whatever
//! render instruction comes back. Every tick recomputes the position from
//! absolute time, so local advances between ticks can never accumulate drift.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::render::RenderInstruction;
use crate::playlist::{MediaKind, Playlist};
use crate::sync::{compute_sync_state, item_ms, SyncError};

/// Where a display is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayPhase {
    /// No playlist fetched yet
    Loading,
    /// Normal rotation
    Synced,
    /// The last item failed to load; rotation skipped past it
    ItemLoadError,
    /// Playlist has nothing playable; waits for content
    EmptyPlaylist,
    /// Every item failed this cycle; waits for the next playlist refetch
    AllItemsFailed,
}

/// The item currently on screen.
#[derive(Debug, Clone)]
struct Showing {
    index: usize,
    item_id: String,
    kind: MediaKind,
    /// When the item's slot began (Unix ms)
    starts_at_ms: i64,
    duration_ms: u64,
}

impl Showing {
    fn local_deadline(&self) -> Option<i64> {
        self.kind
            .is_duration_driven()
            .then(|| self.starts_at_ms.saturating_add(self.duration_ms as i64))
    }
}

/// Rotation state for one display.
#[derive(Debug)]
pub struct DisplayController {
    playlist: Option<Playlist>,
    phase: DisplayPhase,
    showing: Option<Showing>,
    /// Fingerprint of `playlist`
    fingerprint: Option<u64>,
    /// Item ids that failed to load during `failed_cycle`
    failed: BTreeSet<String>,
    failed_cycle: Option<i64>,
    /// Last video that reached its end, and when
    ended: Option<(String, i64)>,
}

impl Default for DisplayController {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayController {
    pub fn new() -> Self {
        Self {
            playlist: None,
            phase: DisplayPhase::Loading,
            showing: None,
            fingerprint: None,
            failed: BTreeSet::new(),
            failed_cycle: None,
            ended: None,
        }
    }

    pub fn phase(&self) -> DisplayPhase {
        self.phase
    }

    pub fn playlist(&self) -> Option<&Playlist> {
        self.playlist.as_ref()
    }

    /// Index of the item on screen, if any.
    pub fn current_index(&self) -> Option<usize> {
        self.showing.as_ref().map(|s| s.index)
    }

    /// Accept a freshly fetched playlist.
    ///
    /// Different content discards all rotation state and resyncs at once.
    /// Identical content is a no-op, except that it retries a display that
    /// gave up after every item failed.
    pub fn on_playlist(&mut self, playlist: Playlist, now_ms: i64) -> Option<RenderInstruction> {
        let fingerprint = playlist.fingerprint();
        let unchanged = self.fingerprint == Some(fingerprint);
        if unchanged && self.phase != DisplayPhase::AllItemsFailed {
            debug!(wall = %playlist.wall, "Playlist unchanged");
            return None;
        }

        if unchanged {
            info!(wall = %playlist.wall, "Playlist refetched, retrying failed items");
        } else {
            info!(wall = %playlist.wall, items = playlist.len(), "Playlist changed, resyncing");
        }

        self.playlist = Some(playlist);
        self.fingerprint = Some(fingerprint);
        self.showing = None;
        self.failed.clear();
        self.failed_cycle = None;
        self.ended = None;
        self.phase = DisplayPhase::Synced;
        self.on_tick(now_ms)
    }

    /// Authoritative recomputation from absolute time.
    ///
    /// Returns an instruction only when the screen has to change.
    pub fn on_tick(&mut self, now_ms: i64) -> Option<RenderInstruction> {
        if self.phase == DisplayPhase::AllItemsFailed {
            return None;
        }
        let playlist = self.playlist.as_ref()?.playable_at(now_ms);

        let state = match compute_sync_state(&playlist, now_ms) {
            Ok(state) => state,
            Err(SyncError::EmptyPlaylist) => return self.enter_empty(),
        };

        if self.failed_cycle != Some(state.cycle_number) {
            if !self.failed.is_empty() {
                debug!(cycle = state.cycle_number, "New cycle, retrying failed items");
            }
            self.failed.clear();
            self.failed_cycle = Some(state.cycle_number);
        }

        let slot = &playlist.items[state.current_index];
        let slot_start = state.cycle_anchor_ms - state.offset_ms as i64;
        let slot_end = slot_start.saturating_add(item_ms(slot));
        let (index, offset_ms, starts_at_ms) =
            match self.first_playable(&playlist, state.current_index) {
                Some(i) if i == state.current_index => (i, state.offset_ms, slot_start),
                // Stand-in for a failed slot, shown from its start
                Some(i) => (i, 0, state.cycle_anchor_ms),
                None => return self.enter_all_failed(playlist.len()),
            };
        let stand_in = index != state.current_index;

        if let Some(showing) = self.showing.as_mut() {
            if showing.index == index && showing.item_id == playlist.items[index].id {
                if !stand_in {
                    showing.starts_at_ms = slot_start;
                }
                return None;
            }
            // The video owning this slot already finished; keep what followed it
            if let Some((ended_id, ended_at)) = &self.ended {
                if *ended_id == slot.id && (slot_start..slot_end).contains(ended_at) {
                    return None;
                }
            }
            // Local rotation through a failed slot runs on until the slot ends
            if stand_in
                && showing.starts_at_ms >= slot_start
                && !self.failed.contains(&showing.item_id)
            {
                return None;
            }
            // A local advance past a boundary inside the current second is
            // ahead of the quantized tick, not behind it
            let shown_end = starts_at_ms.saturating_add(item_ms(&playlist.items[index]));
            if showing.index == (index + 1) % playlist.len()
                && showing.starts_at_ms == shown_end
                && shown_end <= now_ms
            {
                return None;
            }
            debug!(from = showing.index, to = index, "Tick overrides local rotation");
        }

        if matches!(
            self.phase,
            DisplayPhase::Loading | DisplayPhase::EmptyPlaylist
        ) {
            self.phase = DisplayPhase::Synced;
        }
        Some(self.show(&playlist, index, offset_ms, starts_at_ms))
    }

    /// When the on-screen image or widget runs out, if it is duration-driven.
    pub fn next_local_deadline(&self) -> Option<i64> {
        match self.phase {
            DisplayPhase::Synced | DisplayPhase::ItemLoadError => {
                self.showing.as_ref().and_then(Showing::local_deadline)
            }
            _ => None,
        }
    }

    /// Optimistically advance an image or widget whose time is up.
    ///
    /// The next tick still has the final word.
    pub fn on_local_deadline(&mut self, now_ms: i64) -> Option<RenderInstruction> {
        let deadline = self.next_local_deadline()?;
        if now_ms < deadline {
            return None;
        }
        let from = self.showing.as_ref()?.index;
        let playlist = self.playlist.as_ref()?.playable_at(now_ms);
        debug!(from, "Local advance at item end");
        self.advance(&playlist, from, deadline)
    }

    /// The surface accepted the media at `index`.
    pub fn on_media_loaded(&mut self, index: usize) {
        if self.current_index() == Some(index) && self.phase == DisplayPhase::ItemLoadError {
            self.phase = DisplayPhase::Synced;
        }
    }

    /// A video reached its end; move on without waiting for the tick.
    pub fn on_media_ended(&mut self, index: usize, now_ms: i64) -> Option<RenderInstruction> {
        let showing = self.showing.as_ref()?;
        if showing.index != index || showing.kind != MediaKind::Video {
            debug!(index, "Ignoring stale ended event");
            return None;
        }
        self.ended = Some((showing.item_id.clone(), now_ms));
        let playlist = self.playlist.as_ref()?.playable_at(now_ms);
        self.advance(&playlist, index, now_ms)
    }

    /// The media at `index` failed to load or play; skip it for this cycle.
    pub fn on_media_failed(
        &mut self,
        index: usize,
        reason: &str,
        now_ms: i64,
    ) -> Option<RenderInstruction> {
        let showing = self.showing.as_ref()?;
        if showing.index != index {
            debug!(index, "Ignoring stale failure event");
            return None;
        }
        warn!(index, item = %showing.item_id, reason, "Media failed, skipping item");

        self.failed.insert(showing.item_id.clone());
        self.phase = DisplayPhase::ItemLoadError;
        let playlist = self.playlist.as_ref()?.playable_at(now_ms);
        self.advance(&playlist, index, now_ms)
    }

    fn advance(
        &mut self,
        playlist: &Playlist,
        from: usize,
        starts_at_ms: i64,
    ) -> Option<RenderInstruction> {
        if playlist.is_empty() {
            return self.enter_empty();
        }
        match self.first_playable(playlist, (from + 1) % playlist.len()) {
            Some(next) => Some(self.show(playlist, next, 0, starts_at_ms)),
            None => self.enter_all_failed(playlist.len()),
        }
    }

    /// First index at or after `from` (wrapping) whose item hasn't failed.
    fn first_playable(&self, playlist: &Playlist, from: usize) -> Option<usize> {
        let len = playlist.len();
        (0..len)
            .map(|step| (from + step) % len)
            .find(|&i| !self.failed.contains(&playlist.items[i].id))
    }

    fn show(
        &mut self,
        playlist: &Playlist,
        index: usize,
        offset_ms: u64,
        starts_at_ms: i64,
    ) -> RenderInstruction {
        let item = &playlist.items[index];
        debug!(index, item = %item.id, offset_ms, "Showing item");
        self.showing = Some(Showing {
            index,
            item_id: item.id.clone(),
            kind: item.kind,
            starts_at_ms,
            duration_ms: item.duration_ms(),
        });
        RenderInstruction::show(index, item, offset_ms)
    }

    fn enter_empty(&mut self) -> Option<RenderInstruction> {
        self.showing = None;
        if self.phase == DisplayPhase::EmptyPlaylist {
            return None;
        }
        info!("No playable content, showing placeholder");
        self.phase = DisplayPhase::EmptyPlaylist;
        Some(RenderInstruction::NoContent)
    }

    fn enter_all_failed(&mut self, items: usize) -> Option<RenderInstruction> {
        warn!(items, "Every item failed to load, waiting for playlist refetch");
        self.showing = None;
        self.phase = DisplayPhase::AllItemsFailed;
        Some(RenderInstruction::ErrorPlaceholder {
            reason: format!("all {} items failed to load", items),
        })
    }
}
