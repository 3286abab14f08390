use std::collections::HashMap;
use std::sync::Mutex;

use super::{HistoryStore, SettingsStore};
use crate::model::Song;

const HISTORY_CAP: usize = 200;

#[derive(Debug, Default)]
struct Inner {
    history: Vec<Song>,
    favorites: Vec<Song>,
    default_speed: Option<f32>,
    lyric_offsets: HashMap<String, f64>,
}

/// In-memory store; state vanishes with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryStore {
    fn record_played(&self, song: &Song) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        inner.history.retain(|s| s != song);
        inner.history.insert(0, song.clone());
        inner.history.truncate(HISTORY_CAP);
    }

    fn recently_played(&self) -> Vec<Song> {
        self.inner.lock().map(|i| i.history.clone()).unwrap_or_default()
    }

    fn is_favorite(&self, song: &Song) -> bool {
        self.inner
            .lock()
            .map(|i| i.favorites.iter().any(|s| s == song))
            .unwrap_or(false)
    }

    fn toggle_favorite(&self, song: &Song) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if let Some(pos) = inner.favorites.iter().position(|s| s == song) {
            inner.favorites.remove(pos);
        } else {
            inner.favorites.insert(0, song.clone());
        }
    }

    fn favorites(&self) -> Vec<Song> {
        self.inner.lock().map(|i| i.favorites.clone()).unwrap_or_default()
    }
}

impl SettingsStore for MemoryStore {
    fn default_speed(&self) -> f32 {
        self.inner
            .lock()
            .ok()
            .and_then(|i| i.default_speed)
            .unwrap_or(1.0)
    }

    fn set_default_speed(&self, speed: f32) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.default_speed = Some(speed);
        }
    }

    fn lyric_offset(&self, song_id: &str) -> f64 {
        self.inner
            .lock()
            .ok()
            .and_then(|i| i.lyric_offsets.get(song_id).copied())
            .unwrap_or(0.0)
    }

    fn set_lyric_offset(&self, song_id: &str, offset: f64) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.lyric_offsets.insert(song_id.to_string(), offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_most_recent_first_and_deduplicated() {
        let store = MemoryStore::new();
        let a = Song::remote("a");
        let b = Song::remote("b");

        store.record_played(&a);
        store.record_played(&b);
        store.record_played(&a);

        let ids: Vec<String> = store.recently_played().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn favorites_toggle_on_and_off() {
        let store = MemoryStore::new();
        let song = Song::remote("x");

        assert!(!store.is_favorite(&song));
        store.toggle_favorite(&song);
        assert!(store.is_favorite(&song));
        assert_eq!(store.favorites().len(), 1);
        store.toggle_favorite(&song);
        assert!(!store.is_favorite(&song));
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn settings_defaults_and_overrides() {
        let store = MemoryStore::new();
        assert_eq!(store.default_speed(), 1.0);
        assert_eq!(store.lyric_offset("s"), 0.0);

        store.set_default_speed(1.5);
        store.set_lyric_offset("s", -0.4);
        assert_eq!(store.default_speed(), 1.5);
        assert_eq!(store.lyric_offset("s"), -0.4);
    }
}
