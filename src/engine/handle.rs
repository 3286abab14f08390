use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use log::warn;

use crate::model::{PlayMode, Song, Source};
use crate::resolver::SourceResolver;
use crate::session::{
    MediaInput, OpenError, RodioOpener, SessionOpener, TransportSession,
};
use crate::stores::{HistoryStore, SettingsStore};

use super::core::EngineCore;
use super::thread::spawn_engine_thread;
use super::types::{
    EngineCmd, EngineEvent, EngineSnapshot, NowPlaying, RemoteCmd, SnapshotHandle,
};

/// Opener installed when no audio output device could be acquired at
/// startup. Every open fails, which the core degrades into a paused
/// [`FailedSession`](crate::session::FailedSession), so the rest of the
/// engine keeps working.
struct UnavailableOpener;

impl SessionOpener for UnavailableOpener {
    fn open(
        &self,
        _input: &MediaInput,
        _rate: f32,
    ) -> Result<Box<dyn TransportSession>, OpenError> {
        Err(OpenError::NoOutput)
    }
}

/// Handle to the engine thread. Cheap to pass around by reference; all
/// methods enqueue commands and return immediately, `snapshot()` reads
/// the latest published state.
pub struct PlaybackEngine {
    tx: Sender<EngineCmd>,
    snapshot: SnapshotHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl PlaybackEngine {
    /// Start the engine with the default audio backend.
    ///
    /// When no output device is available the engine still starts; opens
    /// fail soft and playback commands become no-ops until restart.
    pub fn new(
        resolver: Option<Arc<dyn SourceResolver>>,
        history: Arc<dyn HistoryStore>,
        settings: Arc<dyn SettingsStore>,
        mode: PlayMode,
        tick: Duration,
    ) -> std::io::Result<Self> {
        Self::with_opener(
            || -> Box<dyn SessionOpener> {
                match RodioOpener::new() {
                    Ok(opener) => Box::new(opener),
                    Err(e) => {
                        warn!("audio output unavailable: {e}");
                        Box::new(UnavailableOpener)
                    }
                }
            },
            resolver,
            history,
            settings,
            mode,
            tick,
        )
    }

    /// Start the engine with a caller-supplied session backend. The
    /// factory runs on the engine thread, so the opener itself does not
    /// need to be `Send`.
    pub fn with_opener<F>(
        opener: F,
        resolver: Option<Arc<dyn SourceResolver>>,
        history: Arc<dyn HistoryStore>,
        settings: Arc<dyn SettingsStore>,
        mode: PlayMode,
        tick: Duration,
    ) -> std::io::Result<Self>
    where
        F: FnOnce() -> Box<dyn SessionOpener> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let snapshot: SnapshotHandle = Arc::new(Mutex::new(EngineSnapshot::default()));

        let core_tx = tx.clone();
        let core_snapshot = Arc::clone(&snapshot);
        let join = spawn_engine_thread(
            move || {
                EngineCore::new(
                    opener(),
                    resolver,
                    history,
                    settings,
                    mode,
                    core_tx,
                    core_snapshot,
                )
            },
            rx,
            tick,
        )?;

        Ok(Self {
            tx,
            snapshot,
            join: Mutex::new(Some(join)),
        })
    }

    /// Replace the queue and start playing at `start`.
    pub fn play_list(&self, songs: Vec<Song>, start: usize) {
        self.send(EngineCmd::PlayList { songs, start });
    }

    /// Queue a song to play right after the current one.
    pub fn enqueue_next(&self, song: Song) {
        self.send(EngineCmd::EnqueueNext(song));
    }

    pub fn play(&self) {
        self.send(EngineCmd::Play);
    }

    pub fn pause(&self) {
        self.send(EngineCmd::Pause);
    }

    pub fn next(&self) {
        self.send(EngineCmd::Next);
    }

    pub fn prev(&self) {
        self.send(EngineCmd::Prev);
    }

    pub fn set_mode(&self, mode: PlayMode) {
        self.send(EngineCmd::SetMode(mode));
    }

    /// Set the playback rate; also persisted as the default for new
    /// sessions.
    pub fn set_speed(&self, rate: f32) {
        self.send(EngineCmd::SetSpeed(rate));
    }

    pub fn seek_to(&self, seconds: f64) {
        self.send(EngineCmd::SeekTo(seconds));
    }

    /// Select the catalog remote songs resolve against.
    pub fn set_source(&self, source: Option<Source>) {
        self.send(EngineCmd::SetSource(source));
    }

    /// Arm (or re-arm) the sleep timer.
    pub fn start_sleep(&self, minutes: u64) {
        self.send(EngineCmd::StartSleep { minutes });
    }

    pub fn cancel_sleep(&self) {
        self.send(EngineCmd::CancelSleep);
    }

    /// Deliver a transport command from the OS remote-control surface.
    pub fn remote(&self, cmd: RemoteCmd) {
        self.send(EngineCmd::Remote(cmd));
    }

    /// Tell the engine the active output route disappeared.
    pub fn route_lost(&self) {
        self.send(EngineCmd::RouteLost);
    }

    /// Receive coarse state-change events. Dropped receivers are pruned
    /// on the next emit.
    pub fn subscribe(&self) -> Receiver<EngineEvent> {
        let (tx, rx) = mpsc::channel();
        self.send(EngineCmd::Subscribe(tx));
        rx
    }

    /// Latest published playback state.
    pub fn snapshot(&self) -> EngineSnapshot {
        self.snapshot
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Display summary for the remote-control surface.
    pub fn now_playing(&self) -> Option<NowPlaying> {
        self.snapshot().song.map(|song| NowPlaying {
            title: song.title().to_string(),
            artist: song.artist.clone(),
        })
    }

    /// Stop the engine thread and wait for it to wind down.
    pub fn quit(&self) {
        let _ = self.tx.send(EngineCmd::Quit);
        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }

    fn send(&self, cmd: EngineCmd) {
        let _ = self.tx.send(cmd);
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.quit();
    }
}
