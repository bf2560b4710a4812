//! Wall-clock playlist synchronization.
//!
//! Every display of a wall runs [`compute_sync_state`] on its own, once per
//! tick, against its own copy of the playlist. There is no coordinator: the
//! displays agree because they all derive position from absolute time.
//!
//! - `state`: the pure synchronizer and its result type
//! - `schedule`: upcoming item transitions derived from the same arithmetic

mod schedule;
mod state;

pub use schedule::{upcoming_transitions, Transition};
pub use state::{compute_sync_state, SyncError, SyncState};

pub(crate) use state::item_ms;
