use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{HistoryStore, SettingsStore};
use crate::model::Song;

const HISTORY_CAP: usize = 200;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file: {0}")]
    Io(#[from] std::io::Error),
    #[error("store file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// Scalar fields first so the serialized document keeps top-level values
// ahead of the tables.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoreDoc {
    default_speed: Option<f32>,
    lyric_offsets: HashMap<String, f64>,
    history: Vec<Song>,
    favorites: Vec<Song>,
}

/// History/favorites/settings persisted as one TOML document.
///
/// Every mutation rewrites the file; the document is small (history is
/// capped) so this stays cheap. Write failures are logged and the
/// in-memory state remains authoritative for the session.
pub struct TomlStore {
    path: PathBuf,
    doc: Mutex<StoreDoc>,
}

impl TomlStore {
    /// Open the store at `path`, creating an empty one if the file does
    /// not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let doc = match std::fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreDoc::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            doc: Mutex::new(doc),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, doc: &StoreDoc) {
        let text = match toml::to_string(doc) {
            Ok(t) => t,
            Err(e) => {
                warn!("failed to serialize store: {e}");
                return;
            }
        };
        if let Some(dir) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                warn!("failed to create store directory {dir:?}: {e}");
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, text) {
            warn!("failed to write store {:?}: {e}", self.path);
        }
    }
}

impl HistoryStore for TomlStore {
    fn record_played(&self, song: &Song) {
        let Ok(mut doc) = self.doc.lock() else {
            return;
        };
        doc.history.retain(|s| s != song);
        doc.history.insert(0, song.clone());
        doc.history.truncate(HISTORY_CAP);
        self.save(&doc);
    }

    fn recently_played(&self) -> Vec<Song> {
        self.doc.lock().map(|d| d.history.clone()).unwrap_or_default()
    }

    fn is_favorite(&self, song: &Song) -> bool {
        self.doc
            .lock()
            .map(|d| d.favorites.iter().any(|s| s == song))
            .unwrap_or(false)
    }

    fn toggle_favorite(&self, song: &Song) {
        let Ok(mut doc) = self.doc.lock() else {
            return;
        };
        if let Some(pos) = doc.favorites.iter().position(|s| s == song) {
            doc.favorites.remove(pos);
        } else {
            doc.favorites.insert(0, song.clone());
        }
        self.save(&doc);
    }

    fn favorites(&self) -> Vec<Song> {
        self.doc.lock().map(|d| d.favorites.clone()).unwrap_or_default()
    }
}

impl SettingsStore for TomlStore {
    fn default_speed(&self) -> f32 {
        self.doc
            .lock()
            .ok()
            .and_then(|d| d.default_speed)
            .unwrap_or(1.0)
    }

    fn set_default_speed(&self, speed: f32) {
        if let Ok(mut doc) = self.doc.lock() {
            doc.default_speed = Some(speed);
            self.save(&doc);
        }
    }

    fn lyric_offset(&self, song_id: &str) -> f64 {
        self.doc
            .lock()
            .ok()
            .and_then(|d| d.lyric_offsets.get(song_id).copied())
            .unwrap_or(0.0)
    }

    fn set_lyric_offset(&self, song_id: &str, offset: f64) {
        if let Ok(mut doc) = self.doc.lock() {
            doc.lyric_offsets.insert(song_id.to_string(), offset);
            self.save(&doc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = TomlStore::open(dir.path().join("store.toml")).unwrap();
        assert!(store.recently_played().is_empty());
        assert_eq!(store.default_speed(), 1.0);
    }

    #[test]
    fn state_round_trips_through_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.toml");

        {
            let store = TomlStore::open(&path).unwrap();
            store.record_played(&Song::remote("a"));
            store.toggle_favorite(&Song::remote("b"));
            store.set_default_speed(1.25);
            store.set_lyric_offset("a", 0.8);
        }

        let reopened = TomlStore::open(&path).unwrap();
        assert_eq!(reopened.recently_played()[0].id, "a");
        assert!(reopened.is_favorite(&Song::remote("b")));
        assert_eq!(reopened.default_speed(), 1.25);
        assert_eq!(reopened.lyric_offset("a"), 0.8);
        assert_eq!(reopened.lyric_offset("unset"), 0.0);
    }

    #[test]
    fn open_rejects_corrupt_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.toml");
        std::fs::write(&path, "not [valid toml").unwrap();
        assert!(matches!(TomlStore::open(&path), Err(StoreError::Parse(_))));
    }

    #[test]
    fn creates_parent_directories_on_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("store.toml");
        let store = TomlStore::open(&path).unwrap();
        store.record_played(&Song::remote("a"));
        assert!(path.exists());
    }
}
