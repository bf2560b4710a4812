//! PlaylistSource trait and source selection.

use std::time::Duration;

use super::error::PlaylistError;
use super::sources::{FileSource, HttpSource};
use super::Playlist;

/// Somewhere a display can fetch its wall's playlist from.
///
/// Implementations are polled on a fixed interval by the display runtime,
/// from a background thread.
pub trait PlaylistSource: Send + Sync {
    /// Fetch the current playlist.
    fn fetch(&self) -> Result<Playlist, PlaylistError>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

/// Pick a source for `location`: `http://` and `https://` go to the content
/// API, anything else is treated as a local file path.
pub fn source_for(location: &str, timeout: Duration) -> Result<Box<dyn PlaylistSource>, PlaylistError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path_selects_file_source() {
        let source = source_for("/srv/walls/lobby.json", Duration::from_secs(5)).unwrap();
        assert_eq!(source.describe(), "file:/srv/walls/lobby.json");
    }

    #[test]
    fn url_selects_http_source() {
        let source = source_for("https://content.invalid/walls/lobby", Duration::from_secs(5)).unwrap();
        assert_eq!(source.describe(), "https://content.invalid/walls/lobby");
    }
}
