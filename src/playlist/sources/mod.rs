//! Playlist source implementations.

mod file;
mod http;

pub use file::FileSource;
pub use http::HttpSource;
