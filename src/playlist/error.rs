//! Playlist loading errors.

use std::path::PathBuf;

/// Errors that can occur while fetching or parsing a playlist.
#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    #[error("Failed to read playlist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid playlist JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid playlist TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Content API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Content API returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Playlist belongs to wall '{found}', expected '{expected}'")]
    WallMismatch { expected: String, found: String },
}
