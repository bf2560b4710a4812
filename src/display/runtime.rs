//! Display runtime: the event loop that drives one physical screen.
//!
//! A [`Display`] owns two threads. The event loop thread holds the
//! [`DisplayController`] and the surface, and is the only place either is
//! touched; ticks, local deadlines, refetched playlists and media events are
//! all handled there one at a time. The poller thread fetches the playlist on
//! a fixed interval and posts it to the loop. Dropping the `Display` (or
//! calling [`Display::shutdown`]) stops and joins both.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::clock::Clock;
use super::controller::DisplayController;
use super::render::{DisplaySurface, RenderInstruction};
use crate::playlist::{Playlist, PlaylistError, PlaylistSource};

/// Timing and addressing for a display.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    /// Wall this display belongs to; playlists for other walls are rejected
    pub wall: Option<String>,
    pub tick_interval: Duration,
    pub poll_interval: Duration,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            wall: None,
            tick_interval: Duration::from_secs(1),
            poll_interval: Duration::from_secs(30),
        }
    }
}

enum DisplayEvent {
    Playlist(Playlist),
    MediaLoaded(usize),
    MediaEnded(usize),
    MediaFailed(usize, String),
    Shutdown,
}

/// Posts media events from an asynchronous surface into a running display.
#[derive(Clone)]
pub struct DisplayHandle {
    events: Sender<DisplayEvent>,
}

impl DisplayHandle {
    /// Returns false once the display has shut down.
    pub fn media_loaded(&self, index: usize) -> bool {
        self.events.send(DisplayEvent::MediaLoaded(index)).is_ok()
    }

    pub fn media_ended(&self, index: usize) -> bool {
        self.events.send(DisplayEvent::MediaEnded(index)).is_ok()
    }

    pub fn media_failed(&self, index: usize, reason: impl Into<String>) -> bool {
        self.events
            .send(DisplayEvent::MediaFailed(index, reason.into()))
            .is_ok()
    }
}

/// One running display.
pub struct Display {
    events: Sender<DisplayEvent>,
    poll_stop: Option<Sender<()>>,
    loop_thread: Option<JoinHandle<()>>,
    poll_thread: Option<JoinHandle<()>>,
}

impl Display {
    /// Spawn the event loop and playlist poller.
    pub fn start(
        options: DisplayOptions,
        source: Box<dyn PlaylistSource>,
        surface: Box<dyn DisplaySurface>,
        clock: Arc<dyn Clock>,
    ) -> std::io::Result<Self> {
        let (events_tx, events_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel();

        info!(
            source = %source.describe(),
            wall = options.wall.as_deref().unwrap_or("*"),
            "Starting display"
        );

        let tick_interval = options.tick_interval;
        let loop_thread = thread::Builder::new()
            .name("wallsync-display".to_string())
            .spawn(move || event_loop(events_rx, surface, clock, tick_interval))?;

        let poll_events = events_tx.clone();
        let poll_thread = thread::Builder::new()
            .name("wallsync-poller".to_string())
            .spawn(move || {
                poll_loop(
                    source,
                    options.wall,
                    options.poll_interval,
                    poll_events,
                    stop_rx,
                )
            })?;

        Ok(Self {
            events: events_tx,
            poll_stop: Some(stop_tx),
            loop_thread: Some(loop_thread),
            poll_thread: Some(poll_thread),
        })
    }

    pub fn handle(&self) -> DisplayHandle {
        DisplayHandle {
            events: self.events.clone(),
        }
    }

    /// Stop the timers and wait for both threads to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(loop_thread) = self.loop_thread.take() else {
            return;
        };
        if let Some(stop) = self.poll_stop.take() {
            let _ = stop.send(());
        }
        // Ignore send errors (loop may already have exited)
        let _ = self.events.send(DisplayEvent::Shutdown);

        for handle in [self.poll_thread.take(), Some(loop_thread)]
            .into_iter()
            .flatten()
        {
            if handle.join().is_err() {
                warn!("Display thread panicked during shutdown");
            }
        }
        debug!("Display stopped");
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        self.stop();
    }
}

fn fetch_for_wall(
    source: &dyn PlaylistSource,
    wall: Option<&str>,
) -> Result<Playlist, PlaylistError> {
    let playlist = source.fetch()?;
    if let Some(wall) = wall {
        playlist.ensure_wall(wall)?;
    }
    Ok(playlist)
}

/// Fetch immediately, then every `interval`, until told to stop.
fn poll_loop(
    source: Box<dyn PlaylistSource>,
    wall: Option<String>,
    interval: Duration,
    events: Sender<DisplayEvent>,
    stop: Receiver<()>,
) {
    loop {
        match fetch_for_wall(source.as_ref(), wall.as_deref()) {
            Ok(playlist) => {
                debug!(items = playlist.len(), "Fetched playlist");
                if events.send(DisplayEvent::Playlist(playlist)).is_err() {
                    break;
                }
            }
            Err(e) => warn!(source = %source.describe(), error = %e, "Playlist fetch failed"),
        }

        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn event_loop(
    events: Receiver<DisplayEvent>,
    mut surface: Box<dyn DisplaySurface>,
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
) {
    let interval_ms = (tick_interval.as_millis() as i64).max(1);
    let mut controller = DisplayController::new();
    let mut next_tick = clock.now_ms();

    loop {
        let now = clock.now_ms();
        if now >= next_tick {
            let instruction = controller.on_tick(now);
            present(&mut controller, surface.as_mut(), instruction, clock.as_ref());
            // Ticks land just after wall-clock interval boundaries
            next_tick = (now.div_euclid(interval_ms) + 1) * interval_ms;
        }

        if controller.next_local_deadline().is_some_and(|d| now >= d) {
            let instruction = controller.on_local_deadline(now);
            present(&mut controller, surface.as_mut(), instruction, clock.as_ref());
        }

        let wake = controller
            .next_local_deadline()
            .map_or(next_tick, |d| d.min(next_tick));
        let wait = Duration::from_millis((wake - clock.now_ms()).max(0) as u64);

        let event = match events.recv_timeout(wait) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let now = clock.now_ms();
        let instruction = match event {
            DisplayEvent::Shutdown => break,
            DisplayEvent::Playlist(playlist) => controller.on_playlist(playlist, now),
            DisplayEvent::MediaLoaded(index) => {
                controller.on_media_loaded(index);
                None
            }
            DisplayEvent::MediaEnded(index) => controller.on_media_ended(index, now),
            DisplayEvent::MediaFailed(index, reason) => {
                controller.on_media_failed(index, &reason, now)
            }
        };
        present(&mut controller, surface.as_mut(), instruction, clock.as_ref());
    }
}

/// Render an instruction, turning synchronous load failures into skips.
fn present(
    controller: &mut DisplayController,
    surface: &mut dyn DisplaySurface,
    instruction: Option<RenderInstruction>,
    clock: &dyn Clock,
) {
    let mut next = instruction;
    while let Some(instruction) = next.take() {
        match surface.render(&instruction) {
            Ok(()) => {
                if let Some(index) = instruction.index() {
                    controller.on_media_loaded(index);
                }
            }
            Err(e) => match instruction.index() {
                Some(index) => {
                    next = controller.on_media_failed(index, &e.to_string(), clock.now_ms());
                }
                None => warn!(error = %e, "Surface failed to render placeholder"),
            },
        }
    }
}
