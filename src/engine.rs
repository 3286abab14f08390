//! The playback engine: a single state-owning thread driven by a command
//! channel, with a 100ms-class sampling tick for progress, lyric sync and
//! auto-advance.

mod core;
mod handle;
mod thread;
mod types;

pub use self::core::EngineCore;
pub use handle::PlaybackEngine;
pub use types::{
    EngineCmd, EngineEvent, EngineSnapshot, EngineState, NowPlaying, RemoteCmd, SnapshotHandle,
};
