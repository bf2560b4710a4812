//! wallsync - wall-clock synchronized playlist playback for media walls
//!
//! Multiple unconnected displays of a wall show the same item at the same
//! time by recomputing their rotation position from absolute wall-clock time
//! every second, instead of keeping local rotation timers.
//!
//! - [`playlist`] - playlist model and sources (file, content API)
//! - [`sync`] - the pure synchronizer
//! - [`display`] - per-display state machine and runtime
//! - [`config`] - configuration file
//! - [`cli`] - command-line definitions

pub mod cli;
pub mod config;
pub mod display;
pub mod playlist;
pub mod sync;

pub use config::Config;
pub use playlist::{MediaKind, Playlist, PlaylistItem};
pub use sync::{compute_sync_state, SyncError, SyncState};
