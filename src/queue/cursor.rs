use std::collections::VecDeque;

use rand::RngExt;

use crate::model::{PlayMode, Song};

/// The ordered play list plus the current-position cursor and the FIFO
/// "play next" override.
///
/// Invariant: `0 <= index <= list.len()`; `index == list.len()` means the
/// cursor ran past the end (only reachable under `Sequence` or with an
/// empty list) and signals end-of-queue to the engine.
#[derive(Debug, Default)]
pub struct PlaylistCursor {
    list: Vec<Song>,
    index: usize,
    pending: VecDeque<Song>,
}

impl PlaylistCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list wholesale, clear the play-next override and move
    /// the cursor to `start` (clamped into `0..=len`).
    pub fn set_list(&mut self, songs: Vec<Song>, start: usize) {
        self.index = start.min(songs.len());
        self.list = songs;
        self.pending.clear();
    }

    pub fn list(&self) -> &[Song] {
        &self.list
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The song under the cursor, or `None` when past the end.
    pub fn current(&self) -> Option<&Song> {
        self.list.get(self.index)
    }

    /// Append to the play-next override; consumed FIFO by `advance`.
    pub fn enqueue_next(&mut self, song: Song) {
        self.pending.push_back(song);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Step the cursor once.
    ///
    /// A queued play-next song is first spliced into the list immediately
    /// after the current index (a permanent list mutation, not a transient
    /// skip), then the mode rule applies. The returned index may equal
    /// `len()`, meaning end-of-queue.
    pub fn advance(&mut self, mode: PlayMode) -> usize {
        if let Some(song) = self.pending.pop_front() {
            let at = (self.index + 1).min(self.list.len());
            self.list.insert(at, song);
        }

        let len = self.list.len();
        self.index = match mode {
            PlayMode::Sequence => (self.index + 1).min(len),
            // Guard the modulo: an empty list stays at 0 (== past-end).
            PlayMode::Loop => {
                if len == 0 {
                    0
                } else {
                    (self.index + 1) % len
                }
            }
            PlayMode::Single => self.index,
            PlayMode::Random => {
                if len == 0 {
                    0
                } else {
                    rand::rng().random_range(0..len)
                }
            }
        };
        self.index
    }

    /// Step back one position, saturating at 0. Ignores the play mode and
    /// the override queue.
    pub fn retreat(&mut self) -> usize {
        self.index = self.index.saturating_sub(1);
        self.index
    }
}
