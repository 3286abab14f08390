//! Engine-facing small types: commands, states, published snapshot and
//! event handles.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use crate::model::{PlayMode, Song, Source};
use crate::session::MediaInput;

/// Transport state of the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// No current song.
    Idle,
    /// Stream resolution or local open in flight.
    Loading,
    Playing,
    Paused,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Abstract transport commands delivered by the OS-level remote-control
/// surface (media keys, lock screen, headset buttons).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RemoteCmd {
    Play,
    Pause,
    PlayPause,
    Next,
    Prev,
}

/// Everything the engine thread can be asked to do. All state mutations
/// funnel through this channel, including results posted back by worker
/// threads.
#[derive(Debug)]
pub enum EngineCmd {
    /// Replace the play list and start playing at `start`.
    PlayList { songs: Vec<Song>, start: usize },
    /// Append to the play-next override queue.
    EnqueueNext(Song),
    Play,
    Pause,
    Next,
    Prev,
    SetMode(PlayMode),
    /// Set the playback rate and persist it as the default.
    SetSpeed(f32),
    SeekTo(f64),
    /// Select the catalog remote songs resolve against.
    SetSource(Option<Source>),
    /// Arm the sleep timer; cancels any previous countdown.
    StartSleep { minutes: u64 },
    CancelSleep,
    Remote(RemoteCmd),
    /// The active output device disappeared.
    RouteLost,
    /// Worker result: resolved + downloaded media for `song_id`
    /// (`None` = resolution or download failed).
    MediaReady {
        song_id: String,
        input: Option<MediaInput>,
    },
    /// Worker result: raw lyric text for `song_id`.
    LyricLoaded {
        song_id: String,
        raw: Option<String>,
    },
    Subscribe(Sender<EngineEvent>),
    /// Stop the engine thread.
    Quit,
}

/// Published playback state, shared behind [`SnapshotHandle`].
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    pub state: EngineState,
    pub song: Option<Song>,
    /// Elapsed seconds of the current session.
    pub progress: f64,
    /// Duration in seconds; `None` while unknown.
    pub total: Option<f64>,
    pub playing: bool,
    pub rate: f32,
    /// Index into the current lyric track, when one line is active.
    pub lyric_line: Option<usize>,
    /// Sleep-timer seconds left; 0 = inactive.
    pub sleep_remaining: f64,
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            state: EngineState::Idle,
            song: None,
            progress: 0.0,
            total: None,
            playing: false,
            rate: 1.0,
            lyric_line: None,
            sleep_remaining: 0.0,
        }
    }
}

pub type SnapshotHandle = Arc<Mutex<EngineSnapshot>>;

/// Coarse state-diff notifications for subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SongChanged(Option<Song>),
    StateChanged(EngineState),
    LyricLineChanged(Option<usize>),
    SleepFinished,
}

/// Summary exposed to the remote-control surface for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: Option<String>,
}
