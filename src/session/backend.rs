//! The `rodio`-backed session implementation.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::sync::Arc;
use std::time::Duration;

use log::warn;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::types::{MediaInput, OpenError, Sample, SessionOpener, TransportSession};

/// Opens [`RodioSession`]s on the default output device.
///
/// Owns the `OutputStream`; construct it on the engine thread (the stream
/// handle is not `Send`).
pub struct RodioOpener {
    stream: OutputStream,
}

impl RodioOpener {
    pub fn new() -> Result<Self, OpenError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when an OutputStream is dropped; keep the
        // embedding application's output clean.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }

    fn connect<R>(&self, reader: R, rate: f32) -> Result<Box<dyn TransportSession>, OpenError>
    where
        R: Read + Seek + Send + Sync + 'static,
    {
        let source = Decoder::new(reader)?;
        // Duration must be read before `append` consumes the source.
        let duration = source.total_duration();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.set_speed(rate);
        sink.pause();

        Ok(Box::new(RodioSession { sink, duration }))
    }
}

impl SessionOpener for RodioOpener {
    fn open(
        &self,
        input: &MediaInput,
        rate: f32,
    ) -> Result<Box<dyn TransportSession>, OpenError> {
        match input {
            MediaInput::File(path) => {
                let file = File::open(path)?;
                self.connect(BufReader::new(file), rate)
            }
            MediaInput::Bytes(bytes) => self.connect(Cursor::new(Arc::clone(bytes)), rate),
        }
    }
}

struct RodioSession {
    sink: Sink,
    duration: Option<Duration>,
}

impl TransportSession for RodioSession {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn set_rate(&mut self, rate: f32) {
        self.sink.set_speed(rate);
    }

    fn seek_to(&mut self, seconds: f64) {
        let target = Duration::from_secs_f64(seconds.max(0.0));
        if let Err(e) = self.sink.try_seek(target) {
            // Not every decoder can seek; playback just continues.
            warn!("seek to {seconds:.1}s failed: {e}");
        }
    }

    fn sample(&self) -> Sample {
        Sample::new(
            self.sink.get_pos().as_secs_f64(),
            self.duration.map(|d| d.as_secs_f64()),
        )
    }

    fn finished(&self) -> bool {
        self.sink.empty()
    }
}
