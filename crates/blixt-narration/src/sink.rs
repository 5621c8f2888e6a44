//! Audio output.

use tracing::debug;

use crate::codec::AudioBuffer;
use crate::error::NarrationResult;

/// Somewhere decoded narration can be played.
pub trait AudioSink {
    /// Start playing `buffer`, replacing anything already playing.
    fn play(&mut self, buffer: &AudioBuffer) -> NarrationResult<()>;

    /// Whether audio is still playing.
    fn is_playing(&self) -> bool;

    /// Stop playback immediately.
    fn stop(&mut self);
}

/// Discards audio. Playback finishes as soon as it starts.
#[derive(Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, buffer: &AudioBuffer) -> NarrationResult<()> {
        debug!(
            frames = buffer.frame_count(),
            secs = buffer.duration().as_secs_f64(),
            "audio discarded"
        );
        Ok(())
    }

    fn is_playing(&self) -> bool {
        false
    }

    fn stop(&mut self) {}
}

#[cfg(feature = "playback")]
pub use self::rodio_sink::RodioSink;

#[cfg(feature = "playback")]
mod rodio_sink {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink};
    use tracing::debug;

    use super::AudioSink;
    use crate::codec::AudioBuffer;
    use crate::error::{NarrationError, NarrationResult};

    /// Plays through the default output device.
    pub struct RodioSink {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sink: Option<Sink>,
    }

    impl RodioSink {
        /// Open the default output device.
        pub fn open() -> NarrationResult<Self> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|e| NarrationError::Playback(e.to_string()))?;
            Ok(Self {
                _stream: stream,
                handle,
                sink: None,
            })
        }
    }

    impl AudioSink for RodioSink {
        fn play(&mut self, buffer: &AudioBuffer) -> NarrationResult<()> {
            self.stop();
            let sink =
                Sink::try_new(&self.handle).map_err(|e| NarrationError::Playback(e.to_string()))?;
            sink.append(SamplesBuffer::new(
                buffer.channel_count(),
                buffer.sample_rate(),
                buffer.interleaved(),
            ));
            debug!(secs = buffer.duration().as_secs_f64(), "playback started");
            self.sink = Some(sink);
            Ok(())
        }

        fn is_playing(&self) -> bool {
            self.sink.as_ref().is_some_and(|sink| !sink.empty())
        }

        fn stop(&mut self) {
            if let Some(sink) = self.sink.take() {
                sink.stop();
            }
        }
    }
}
