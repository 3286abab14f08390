use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use log::{debug, warn};

use crate::lyric::{LyricCursor, LyricTrack};
use crate::model::{PlayMode, Song, Source};
use crate::queue::PlaylistCursor;
use crate::resolver::SourceResolver;
use crate::session::{FailedSession, MediaInput, SessionOpener, TransportSession};
use crate::stores::{HistoryStore, SettingsStore};

use super::types::{
    EngineCmd, EngineEvent, EngineSnapshot, EngineState, RemoteCmd, SnapshotHandle,
};

/// The playback state machine.
///
/// Owns the cursor, the active session and the lyric index. All methods
/// run on the engine thread; long-running work (stream resolution, media
/// download, lyric fetch) happens on spawned workers that post their
/// results back through `tx` as [`EngineCmd`]s, tagged with the song id
/// they were requested for so stale results can be discarded.
///
/// `apply` + `tick` are deterministic: tests drive them directly with a
/// fake session opener and hand-rolled `dt` values.
pub struct EngineCore {
    cursor: PlaylistCursor,
    mode: PlayMode,
    state: EngineState,
    session: Option<Box<dyn TransportSession>>,
    lyric: Option<LyricTrack>,
    lyric_cursor: LyricCursor,
    lyric_offset: f64,
    rate: f32,
    sleep_remaining: f64,
    active_source: Option<Source>,

    opener: Box<dyn SessionOpener>,
    resolver: Option<Arc<dyn SourceResolver>>,
    history: Arc<dyn HistoryStore>,
    settings: Arc<dyn SettingsStore>,

    tx: Sender<EngineCmd>,
    snapshot: SnapshotHandle,
    subscribers: Vec<Sender<EngineEvent>>,
}

impl EngineCore {
    pub fn new(
        opener: Box<dyn SessionOpener>,
        resolver: Option<Arc<dyn SourceResolver>>,
        history: Arc<dyn HistoryStore>,
        settings: Arc<dyn SettingsStore>,
        mode: PlayMode,
        tx: Sender<EngineCmd>,
        snapshot: SnapshotHandle,
    ) -> Self {
        let rate = settings.default_speed();
        let core = Self {
            cursor: PlaylistCursor::new(),
            mode,
            state: EngineState::Idle,
            session: None,
            lyric: None,
            lyric_cursor: LyricCursor::new(),
            lyric_offset: 0.0,
            rate,
            sleep_remaining: 0.0,
            active_source: None,
            opener,
            resolver,
            history,
            settings,
            tx,
            snapshot,
            subscribers: Vec::new(),
        };
        core.publish(|s| s.rate = rate);
        core
    }

    /// Dispatch one command. `Quit` is handled by the engine thread, not
    /// here.
    pub fn apply(&mut self, cmd: EngineCmd) {
        match cmd {
            EngineCmd::PlayList { songs, start } => self.play_list(songs, start),
            EngineCmd::EnqueueNext(song) => self.cursor.enqueue_next(song),
            EngineCmd::Play => self.play(),
            EngineCmd::Pause => self.pause(),
            EngineCmd::Next => self.next(),
            EngineCmd::Prev => self.prev(),
            EngineCmd::SetMode(mode) => self.mode = mode,
            EngineCmd::SetSpeed(rate) => self.set_speed(rate),
            EngineCmd::SeekTo(seconds) => self.seek_to(seconds),
            EngineCmd::SetSource(source) => self.active_source = source,
            EngineCmd::StartSleep { minutes } => self.start_sleep(minutes),
            EngineCmd::CancelSleep => self.cancel_sleep(),
            EngineCmd::Remote(remote) => self.remote(remote),
            EngineCmd::RouteLost => self.route_lost(),
            EngineCmd::MediaReady { song_id, input } => self.media_ready(&song_id, input),
            EngineCmd::LyricLoaded { song_id, raw } => self.lyric_loaded(&song_id, raw),
            EngineCmd::Subscribe(sender) => self.subscribers.push(sender),
            EngineCmd::Quit => {}
        }
    }

    /// One sampling step: sleep-timer countdown, progress publishing,
    /// lyric sync and end-of-track auto-advance. `dt` is the wall time
    /// since the previous tick; tests pass whatever they need.
    pub fn tick(&mut self, dt: f64) {
        if self.sleep_remaining > 0.0 {
            self.sleep_remaining = (self.sleep_remaining - dt).max(0.0);
            if self.sleep_remaining == 0.0 {
                self.pause();
                self.emit(EngineEvent::SleepFinished);
            }
        }
        let sleep_remaining = self.sleep_remaining;
        self.publish(|s| s.sleep_remaining = sleep_remaining);

        let Some((sample, finished)) = self.session.as_ref().map(|s| (s.sample(), s.finished()))
        else {
            return;
        };

        self.publish(|s| {
            s.progress = sample.elapsed;
            if sample.duration.is_some() {
                s.total = sample.duration;
            }
        });

        let line = self.lyric.as_ref().map(|track| {
            self.lyric_cursor
                .advance(track, sample.elapsed + self.lyric_offset)
        });
        if let Some(line) = line {
            let published = self
                .snapshot
                .lock()
                .map(|s| s.lyric_line)
                .unwrap_or_default();
            if line != published {
                self.publish(|s| s.lyric_line = line);
                self.emit(EngineEvent::LyricLineChanged(line));
            }
        }

        if self.state == EngineState::Playing && finished {
            self.next();
        }
    }

    /// Stop the session and publish a halted snapshot; called when the
    /// engine thread winds down.
    pub fn shutdown(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.pause();
        }
        self.session = None;
        self.set_state(EngineState::Idle);
    }

    fn play_list(&mut self, songs: Vec<Song>, start: usize) {
        self.cursor.set_list(songs, start);
        self.load_current();
    }

    /// Load the song under the cursor.
    ///
    /// Remote resolution runs on a worker. A failed resolution leaves the
    /// engine stalled with no automatic retry or skip; the user advances
    /// manually.
    fn load_current(&mut self) {
        let Some(song) = self.cursor.current().cloned() else {
            self.stop_playback();
            return;
        };

        self.history.record_played(&song);

        self.session = None;
        self.lyric = None;
        self.lyric_cursor.reset();
        self.lyric_offset = self.settings.lyric_offset(&song.id);

        let published = song.clone();
        self.publish(move |s| {
            s.song = Some(published);
            s.progress = 0.0;
            s.total = song_total(s.song.as_ref());
            s.lyric_line = None;
        });
        self.emit(EngineEvent::SongChanged(Some(song.clone())));
        self.set_state(EngineState::Loading);

        if !song.is_local {
            self.spawn_lyric_fetch(&song);
        }

        if song.is_local {
            match song.local_path.clone() {
                Some(path) => self.open_session(MediaInput::File(path)),
                None => {
                    warn!("local song {} has no file path", song.id);
                    self.stall();
                }
            }
        } else {
            match (self.resolver.clone(), self.active_source.clone()) {
                (Some(resolver), Some(source)) => {
                    let tx = self.tx.clone();
                    let song_id = song.id;
                    thread::spawn(move || {
                        let input = resolver
                            .resolve_stream_url(&song_id, &source)
                            .and_then(|url| resolver.fetch_media(&url))
                            .map(|bytes| MediaInput::Bytes(bytes.into()));
                        let _ = tx.send(EngineCmd::MediaReady { song_id, input });
                    });
                }
                _ => {
                    warn!("no resolver or source configured for remote song {}", song.id);
                    self.stall();
                }
            }
        }
    }

    fn spawn_lyric_fetch(&self, song: &Song) {
        let (Some(resolver), Some(source)) = (self.resolver.clone(), self.active_source.clone())
        else {
            return;
        };
        let tx = self.tx.clone();
        let song_id = song.id.clone();
        thread::spawn(move || {
            let raw = resolver.fetch_lyric(&song_id, &source);
            let _ = tx.send(EngineCmd::LyricLoaded { song_id, raw });
        });
    }

    fn media_ready(&mut self, song_id: &str, input: Option<MediaInput>) {
        let current = self.cursor.current().map(|s| s.id.as_str());
        if self.state != EngineState::Loading || current != Some(song_id) {
            debug!("discarding stale media result for {song_id}");
            return;
        }
        match input {
            Some(input) => self.open_session(input),
            None => {
                warn!("stream resolution failed for {song_id}");
                self.stall();
            }
        }
    }

    fn lyric_loaded(&mut self, song_id: &str, raw: Option<String>) {
        let current = self.cursor.current().map(|s| s.id.as_str());
        if current != Some(song_id) {
            debug!("discarding stale lyric result for {song_id}");
            return;
        }
        self.lyric = raw.map(|raw| LyricTrack::parse(&raw)).filter(|t| !t.is_empty());
        self.lyric_cursor.reset();
        self.publish(|s| s.lyric_line = None);
    }

    fn open_session(&mut self, input: MediaInput) {
        match self.opener.open(&input, self.rate) {
            Ok(mut session) => {
                session.play();
                self.session = Some(session);
                self.set_state(EngineState::Playing);
            }
            Err(e) => {
                warn!("failed to open media: {e}");
                // Keep a failed session so transport commands stay no-ops
                // and the user can skip past the broken track.
                self.session = Some(Box::new(FailedSession));
                self.publish(|s| {
                    s.progress = 0.0;
                    s.total = None;
                });
                self.set_state(EngineState::Paused);
            }
        }
    }

    fn play(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.play();
        self.set_state(EngineState::Playing);
    }

    fn pause(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.pause();
        self.set_state(EngineState::Paused);
    }

    fn next(&mut self) {
        self.cursor.advance(self.mode);
        if self.cursor.current().is_none() {
            // End of queue: halt rather than resolve a song.
            self.stop_playback();
        } else {
            self.load_current();
        }
    }

    fn prev(&mut self) {
        // Retreat floors at 0; index 0 replays the first track.
        self.cursor.retreat();
        self.load_current();
    }

    fn set_speed(&mut self, rate: f32) {
        self.rate = rate;
        self.settings.set_default_speed(rate);
        if let Some(session) = self.session.as_mut() {
            session.set_rate(rate);
        }
        self.publish(|s| s.rate = rate);
    }

    fn seek_to(&mut self, seconds: f64) {
        if let Some(session) = self.session.as_mut() {
            session.seek_to(seconds);
        }
    }

    fn start_sleep(&mut self, minutes: u64) {
        self.sleep_remaining = (minutes * 60) as f64;
        let remaining = self.sleep_remaining;
        self.publish(|s| s.sleep_remaining = remaining);
    }

    fn cancel_sleep(&mut self) {
        self.sleep_remaining = 0.0;
        self.publish(|s| s.sleep_remaining = 0.0);
    }

    fn remote(&mut self, cmd: RemoteCmd) {
        match cmd {
            RemoteCmd::Play => self.play(),
            RemoteCmd::Pause => self.pause(),
            RemoteCmd::PlayPause => {
                if self.state == EngineState::Playing {
                    self.pause();
                } else {
                    self.play();
                }
            }
            RemoteCmd::Next => self.next(),
            RemoteCmd::Prev => self.prev(),
        }
    }

    /// Safety contract: never keep playing into a dead output route.
    fn route_lost(&mut self) {
        self.pause();
    }

    /// Resolution failed (or cannot be attempted): drop the pending
    /// session and sit idle with the current song still published.
    fn stall(&mut self) {
        self.session = None;
        self.set_state(EngineState::Idle);
    }

    fn stop_playback(&mut self) {
        self.session = None;
        self.publish(|s| s.progress = 0.0);
        self.set_state(EngineState::Idle);
    }

    fn set_state(&mut self, state: EngineState) {
        if self.state == state {
            return;
        }
        self.state = state;
        let playing = state == EngineState::Playing;
        self.publish(move |s| {
            s.state = state;
            s.playing = playing;
        });
        self.emit(EngineEvent::StateChanged(state));
    }

    fn publish<F: FnOnce(&mut EngineSnapshot)>(&self, f: F) {
        if let Ok(mut snapshot) = self.snapshot.lock() {
            f(&mut snapshot);
        }
    }

    fn emit(&mut self, event: EngineEvent) {
        self.subscribers.retain(|s| s.send(event.clone()).is_ok());
    }
}

// Catalog-reported duration serves as the published total until the
// session learns better.
fn song_total(song: Option<&Song>) -> Option<f64> {
    song.and_then(|s| s.duration).filter(|d| d.is_finite() && *d >= 0.0)
}
