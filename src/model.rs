//! Core value types: songs, catalog sources and play modes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single playable item, either from a remote catalog or a local file.
///
/// Metadata fields are optional because catalogs routinely omit them;
/// `None` means "unknown", which is distinct from an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Opaque identifier, unique within its source (or locally generated).
    pub id: String,
    pub name: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Duration in seconds, when the catalog reports one.
    pub duration: Option<f64>,
    /// Artwork reference (URL or path), when available.
    pub artwork: Option<String>,
    pub is_local: bool,
    /// Set for local songs; `None` for remote ones.
    pub local_path: Option<PathBuf>,
}

impl Song {
    /// A remote song known only by id; metadata can be filled in later.
    pub fn remote(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            artist: None,
            album: None,
            duration: None,
            artwork: None,
            is_local: false,
            local_path: None,
        }
    }

    /// A local song backed by a file on disk. The path doubles as the id.
    pub fn local(path: PathBuf) -> Self {
        Self {
            id: path.to_string_lossy().into_owned(),
            name: None,
            artist: None,
            album: None,
            duration: None,
            artwork: None,
            is_local: true,
            local_path: Some(path),
        }
    }

    /// Display title: the name when known, otherwise the id.
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

// Songs are equal when their ids are; metadata may lag behind.
impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Song {}

/// A configured remote catalog: three URL templates.
///
/// Templates use `{id}` and `{keyword}` placeholders, filled by the
/// resolver implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    /// Search endpoint; `{keyword}` placeholder.
    pub search_url: String,
    /// Stream-URL resolution endpoint; `{id}` placeholder.
    pub stream_url: String,
    /// Lyric fetch endpoint; `{id}` placeholder.
    pub lyric_url: String,
}

/// Governs how the cursor advances when a track ends or `next` is called.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayMode {
    /// Advance in order and stop past the end of the list.
    Sequence,
    /// Advance in order and wrap around.
    Loop,
    /// Repeat the current song.
    Single,
    /// Pick a uniformly random index; immediate repeats are allowed.
    Random,
}

impl Default for PlayMode {
    fn default() -> Self {
        Self::Sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_equality_is_by_id_only() {
        let mut a = Song::remote("42");
        let mut b = Song::remote("42");
        a.name = Some("One title".to_string());
        b.name = Some("Another title".to_string());
        assert_eq!(a, b);

        let c = Song::remote("43");
        assert_ne!(a, c);
    }

    #[test]
    fn local_song_uses_path_as_id() {
        let song = Song::local(PathBuf::from("/music/a.mp3"));
        assert!(song.is_local);
        assert_eq!(song.id, "/music/a.mp3");
        assert_eq!(song.local_path.as_deref(), Some(std::path::Path::new("/music/a.mp3")));
    }

    #[test]
    fn title_falls_back_to_id() {
        let mut song = Song::remote("abc");
        assert_eq!(song.title(), "abc");
        song.name = Some("Named".to_string());
        assert_eq!(song.title(), "Named");
    }
}
