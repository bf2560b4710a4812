//! Running a single display of a wall.
//!
//! The display layer sits on top of the pure synchronizer:
//!
//! - `controller`: the per-display state machine (`Loading`, `Synced`,
//!   `ItemLoadError`, `EmptyPlaylist`, `AllItemsFailed`)
//! - `render`: render instructions and the `DisplaySurface` trait
//! - `clock`: wall-clock sources
//! - `runtime`: the owned event loop and playlist poller for one screen
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use wallsync::display::{Display, DisplayOptions, OutputFormat, StdoutSurface, SystemClock};
//! use wallsync::playlist::sources::FileSource;
//!
//! let display = Display::start(
//!     DisplayOptions::default(),
//!     Box::new(FileSource::new("lobby.json")),
//!     Box::new(StdoutSurface::new(OutputFormat::Text)),
//!     Arc::new(SystemClock::new()),
//! )
//! .unwrap();
//! // ... later, when the screen is torn down:
//! display.shutdown();
//! ```

mod clock;
mod controller;
mod render;
mod runtime;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{DisplayController, DisplayPhase};
pub use render::{DisplaySurface, OutputFormat, RenderInstruction, StdoutSurface, SurfaceError};
pub use runtime::{Display, DisplayHandle, DisplayOptions};
