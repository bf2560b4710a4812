//! Render instructions and the surfaces that consume them.

use std::io::Write;

use serde::Serialize;

use crate::playlist::{MediaKind, PlaylistItem};

/// What a display surface should put on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RenderInstruction {
    /// Show a playlist item
    Show {
        index: usize,
        item_id: String,
        kind: MediaKind,
        media_ref: String,
        /// Where to seek on load; only set for video
        #[serde(skip_serializing_if = "Option::is_none")]
        seek_ms: Option<u64>,
        duration_ms: u64,
    },
    /// Placeholder for a wall with nothing to rotate
    NoContent,
    /// Placeholder after every item failed to load
    ErrorPlaceholder { reason: String },
}

impl RenderInstruction {
    pub(crate) fn show(index: usize, item: &PlaylistItem, offset_ms: u64) -> Self {
        let seek_ms = match item.kind {
            MediaKind::Video => Some(offset_ms),
            MediaKind::Image | MediaKind::Widget => None,
        };
        Self::Show {
            index,
            item_id: item.id.clone(),
            kind: item.kind,
            media_ref: item.media_ref.clone(),
            seek_ms,
            duration_ms: item.duration_ms(),
        }
    }

    /// Playlist index this instruction shows, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Show { index, .. } => Some(*index),
            Self::NoContent | Self::ErrorPlaceholder { .. } => None,
        }
    }
}

impl std::fmt::Display for RenderInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Show {
                index,
                item_id,
                kind,
                media_ref,
                seek_ms,
                ..
            } => {
                write!(f, "show #{} {} ({}) {}", index, item_id, kind, media_ref)?;
                if let Some(seek) = seek_ms {
                    write!(f, " seek={}ms", seek)?;
                }
                Ok(())
            }
            Self::NoContent => write!(f, "no content"),
            Self::ErrorPlaceholder { reason } => write!(f, "error: {}", reason),
        }
    }
}

/// Errors a surface can report while rendering.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Media '{media_ref}' failed to load: {message}")]
    LoadFailed { media_ref: String, message: String },

    #[error("Surface output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode render instruction: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Something that can put a render instruction on screen.
///
/// `Ok` from `render` means the media was accepted. Surfaces that load media
/// asynchronously report later failures and video end events through the
/// display handle instead.
pub trait DisplaySurface: Send {
    fn render(&mut self, instruction: &RenderInstruction) -> Result<(), SurfaceError>;
}

/// Line format for [`StdoutSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Writes one line per instruction, for headless walls and debugging.
pub struct StdoutSurface<W: Write + Send = std::io::Stdout> {
    out: W,
    format: OutputFormat,
}

impl StdoutSurface {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_writer(std::io::stdout(), format)
    }
}

impl<W: Write + Send> StdoutSurface<W> {
    pub fn with_writer(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> DisplaySurface for StdoutSurface<W> {
    fn render(&mut self, instruction: &RenderInstruction) -> Result<(), SurfaceError> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", instruction)?,
            OutputFormat::Json => {
                let line = serde_json::to_string(instruction)?;
                writeln!(self.out, "{}", line)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}
