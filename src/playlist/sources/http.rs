//! Content API playlist source.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::playlist::{Playlist, PlaylistError, PlaylistSource};

/// Fetches the playlist as JSON from the hosted content API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PlaylistError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wallsync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(url, client))
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

impl PlaylistSource for HttpSource {
    fn fetch(&self) -> Result<Playlist, PlaylistError> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlaylistError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }
        let body = response.text()?;
        Playlist::from_json_str(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
