//! Playback sessions: one open audio source with transport primitives.
//!
//! The engine talks to sessions through the [`TransportSession`] trait so
//! tests can drive a fake; the production implementation sits on top of
//! `rodio` in [`backend`].

mod backend;
mod types;

pub use backend::RodioOpener;
pub use types::{FailedSession, MediaInput, OpenError, Sample, SessionOpener, TransportSession};
