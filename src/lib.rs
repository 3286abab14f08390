//! vivace is the playback core of a streaming music client: a queue with
//! play modes and a play-next override, remote catalog resolution,
//! synced-lyric tracking and a single engine thread that owns the audio
//! output.
//!
//! The entry point is [`engine::PlaybackEngine`]; everything else
//! (resolver, stores, session backend) plugs in through traits.

pub mod config;
pub mod engine;
pub mod local;
pub mod lyric;
pub mod model;
pub mod queue;
pub mod resolver;
pub mod session;
pub mod stores;
