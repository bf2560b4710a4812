//! `wallsync run` handler

use std::sync::mpsc;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use wallsync::cli::RunArgs;
use wallsync::display::{Display, OutputFormat, StdoutSurface, SystemClock};
use wallsync::playlist::source_for;
use wallsync::Config;

/// Run one display until Ctrl-C.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: RunArgs, config: &Config) -> Result<()> {
    let location = args
        .source
        .or_else(|| config.source.location.clone())
        .context("No playlist source: pass SOURCE or set source.location in the config")?;

    let mut options = config.display_options();
    if args.wall.is_some() {
        options.wall = args.wall;
    }
    let format = if args.json {
        OutputFormat::Json
    } else {
        config.display.output
    };
    let offset = args
        .clock_offset_ms
        .unwrap_or(config.display.clock_offset_ms);

    let source = source_for(&location, config.request_timeout())?;

    let (stop_tx, stop_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .context("Failed to install Ctrl-C handler")?;

    let display = Display::start(
        options,
        source,
        Box::new(StdoutSurface::new(format)),
        Arc::new(SystemClock::with_offset(offset)),
    )
    .context("Failed to start display")?;

    // Either a signal or a dropped handler ends the run
    let _ = stop_rx.recv();
    info!("Interrupted, shutting down");
    display.shutdown();
    Ok(())
}
