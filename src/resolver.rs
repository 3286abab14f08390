//! Remote catalog access: stream-URL resolution, search and lyric fetch.
//!
//! The engine only knows the [`SourceResolver`] trait; the wire format
//! belongs to the implementation. [`HttpResolver`] is the reference
//! implementation over the project's JSON endpoints.

mod http;

pub use http::HttpResolver;

use crate::model::{Song, Source};

/// Catalog operations, called from engine worker threads (never from the
/// engine thread itself). Every method fails soft with `None`/empty.
pub trait SourceResolver: Send + Sync {
    /// Resolve a song id to a playable stream URL, or `None` on failure.
    fn resolve_stream_url(&self, song_id: &str, source: &Source) -> Option<String>;

    /// Search the catalog for songs matching `keyword`.
    fn search(&self, keyword: &str, source: &Source) -> Vec<Song>;

    /// Fetch raw timestamped lyric text for a song, or `None`.
    fn fetch_lyric(&self, song_id: &str, source: &Source) -> Option<String>;

    /// Download the media behind a resolved stream URL. Runs on the same
    /// worker as the resolution so no network I/O touches the engine
    /// thread.
    fn fetch_media(&self, url: &str) -> Option<Vec<u8>>;
}
