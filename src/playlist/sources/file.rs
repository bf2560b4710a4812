//! Local file playlist source.

use std::path::PathBuf;

use crate::playlist::{Playlist, PlaylistError, PlaylistSource};

/// Reads the playlist from a JSON or TOML file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PlaylistSource for FileSource {
    fn fetch(&self) -> Result<Playlist, PlaylistError> {
        Playlist::load(&self.path)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
