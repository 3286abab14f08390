//! Persistence collaborators: play history, favorites and user settings.
//!
//! The engine depends only on the traits; [`MemoryStore`] backs tests and
//! ephemeral setups, [`TomlStore`] persists to a single TOML file.

mod file;
mod memory;

pub use file::{StoreError, TomlStore};
pub use memory::MemoryStore;

use crate::model::Song;

/// Play history and favorites. `record_played` is fire-and-forget from the
/// engine's point of view; implementations must not block for long.
pub trait HistoryStore: Send + Sync {
    fn record_played(&self, song: &Song);
    /// Most recent first.
    fn recently_played(&self) -> Vec<Song>;
    fn is_favorite(&self, song: &Song) -> bool;
    fn toggle_favorite(&self, song: &Song);
    fn favorites(&self) -> Vec<Song>;
}

/// User settings the engine reads and writes.
pub trait SettingsStore: Send + Sync {
    /// Playback-rate multiplier applied to new sessions; 1.0 by default.
    fn default_speed(&self) -> f32;
    fn set_default_speed(&self, speed: f32);
    /// Per-song lyric timing correction in seconds; 0.0 when unset.
    fn lyric_offset(&self, song_id: &str) -> f64;
    fn set_lyric_offset(&self, song_id: &str, offset: f64);
}
