use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// What a session is opened from: a local file, or the bytes of a
/// resolved remote stream (downloaded off the engine thread).
#[derive(Clone)]
pub enum MediaInput {
    File(PathBuf),
    Bytes(Arc<[u8]>),
}

impl fmt::Debug for MediaInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

/// One elapsed/duration reading. `duration` is `None` while unknown and
/// is never a non-finite number.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Sample {
    pub elapsed: f64,
    pub duration: Option<f64>,
}

impl Sample {
    pub fn new(elapsed: f64, duration: Option<f64>) -> Self {
        // Callers must see "unknown", not zero or NaN/inf.
        let duration = duration.filter(|d| d.is_finite() && *d >= 0.0);
        Self { elapsed, duration }
    }

    pub fn unknown() -> Self {
        Self::default()
    }
}

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("audio output unavailable")]
    NoOutput,
    #[error("failed to open media file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode media: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

/// Transport primitives over a single open audio source.
///
/// Sessions live on the engine thread only (the audio output handle is
/// not `Send`), so the trait carries no thread bounds.
pub trait TransportSession {
    fn play(&mut self);
    fn pause(&mut self);
    /// Applies even while paused; takes effect on resume.
    fn set_rate(&mut self, rate: f32);
    fn seek_to(&mut self, seconds: f64);
    fn sample(&self) -> Sample;
    /// True once the source has been fully played out.
    fn finished(&self) -> bool;
}

/// Creates sessions. Opening fully replaces any prior session; the engine
/// drops the old one first.
pub trait SessionOpener {
    fn open(&self, input: &MediaInput, rate: f32)
    -> Result<Box<dyn TransportSession>, OpenError>;
}

/// Stand-in session kept after an open failure: answers `sample()` with
/// unknown/zero and never finishes, so the engine stays alive and the
/// user can skip past the broken track.
#[derive(Debug, Default)]
pub struct FailedSession;

impl TransportSession for FailedSession {
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn set_rate(&mut self, _rate: f32) {}
    fn seek_to(&mut self, _seconds: f64) {}

    fn sample(&self) -> Sample {
        Sample::unknown()
    }

    fn finished(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_filters_non_finite_durations() {
        assert_eq!(Sample::new(1.0, Some(f64::NAN)).duration, None);
        assert_eq!(Sample::new(1.0, Some(f64::INFINITY)).duration, None);
        assert_eq!(Sample::new(1.0, Some(-3.0)).duration, None);
        assert_eq!(Sample::new(1.0, Some(180.0)).duration, Some(180.0));
    }

    #[test]
    fn failed_session_reports_unknown_and_never_finishes() {
        let mut s = FailedSession;
        s.play();
        s.set_rate(2.0);
        s.seek_to(30.0);
        assert_eq!(s.sample(), Sample::unknown());
        assert!(!s.finished());
    }
}
