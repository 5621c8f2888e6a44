//! Single-flight narration.
//!
//! At most one request is alive at a time. The speech service call and the
//! decoding run on a worker thread; the result comes back over a channel and
//! is applied by [`Narrator::poll`] on the caller's thread, which also owns
//! the audio sink. Every failure is logged and ends the request quietly.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use blixt_core::Step;
use tracing::{debug, info, warn};

use crate::client::SpeechSynthesizer;
use crate::codec::{AudioBuffer, decode_payload};
use crate::config::NarrationConfig;
use crate::error::{NarrationError, NarrationResult};
use crate::sink::AudioSink;

/// How a finished request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationOutcome {
    /// The audio played to the end.
    Played,
    /// Nothing played; the message says why.
    Failed(String),
}

/// Where the current request stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    /// No request has been made, or the last one was cancelled.
    #[default]
    Idle,
    /// Waiting for the speech service.
    InFlight,
    /// Audio is playing.
    Speaking,
    /// The last request finished.
    Done(NarrationOutcome),
}

impl RequestState {
    /// Whether a new request would be rejected.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::InFlight | Self::Speaking)
    }
}

type WorkerReply = (u64, NarrationResult<AudioBuffer>);

/// Drives narration requests against a [`SpeechSynthesizer`] and an [`AudioSink`].
pub struct Narrator {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    sink: Box<dyn AudioSink>,
    sample_rate: u32,
    channels: u16,
    state: RequestState,
    generation: u64,
    tx: Sender<WorkerReply>,
    rx: Receiver<WorkerReply>,
}

impl std::fmt::Debug for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrator")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("sample_rate", &self.sample_rate)
            .field("channels", &self.channels)
            .finish_non_exhaustive()
    }
}

impl Narrator {
    /// Create an idle narrator expecting 24 kHz mono audio.
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, sink: Box<dyn AudioSink>) -> Self {
        let defaults = NarrationConfig::default();
        let (tx, rx) = mpsc::channel();
        Self {
            synthesizer,
            sink,
            sample_rate: defaults.sample_rate,
            channels: defaults.channels,
            state: RequestState::Idle,
            generation: 0,
            tx,
            rx,
        }
    }

    /// Use the audio format from `config`.
    pub fn with_format(mut self, config: &NarrationConfig) -> Self {
        self.sample_rate = config.sample_rate;
        self.channels = config.channels;
        self
    }

    /// Start narrating `prompt`. Rejected with [`NarrationError::Busy`]
    /// while another request is in flight or speaking.
    pub fn request(&mut self, prompt: impl Into<String>) -> NarrationResult<()> {
        if self.state.is_busy() {
            return Err(NarrationError::Busy);
        }
        self.generation += 1;
        self.state = RequestState::InFlight;

        let prompt = prompt.into();
        let generation = self.generation;
        let synthesizer = Arc::clone(&self.synthesizer);
        let tx = self.tx.clone();
        let (rate, channels) = (self.sample_rate, self.channels);
        debug!(generation, "narration request started");

        thread::spawn(move || {
            let result = synthesizer
                .synthesize(&prompt)
                .and_then(|payload| decode_payload(&payload, rate, channels));
            // The narrator may already be gone.
            let _ = tx.send((generation, result));
        });
        Ok(())
    }

    /// Narrate one step.
    pub fn narrate_step(&mut self, step: &Step) -> NarrationResult<()> {
        self.request(step.narration_prompt())
    }

    /// Apply any finished work and notice when playback ends.
    pub fn poll(&mut self) -> &RequestState {
        while let Ok((generation, result)) = self.rx.try_recv() {
            if generation != self.generation || self.state != RequestState::InFlight {
                debug!(generation, "stale narration result discarded");
                continue;
            }
            let started = result.and_then(|buffer| self.sink.play(&buffer).map(|()| buffer));
            self.state = match started {
                Ok(buffer) => {
                    info!(secs = buffer.duration().as_secs_f64(), "narration playing");
                    RequestState::Speaking
                }
                Err(e) => {
                    warn!(error = %e, "narration skipped");
                    RequestState::Done(NarrationOutcome::Failed(e.to_string()))
                }
            };
        }

        if self.state == RequestState::Speaking && !self.sink.is_playing() {
            info!("narration finished");
            self.state = RequestState::Done(NarrationOutcome::Played);
        }
        &self.state
    }

    /// Drop the current request and stop playback. A result that arrives
    /// later is ignored.
    pub fn cancel(&mut self) {
        if self.state.is_busy() {
            debug!(generation = self.generation, "narration cancelled");
        }
        self.generation += 1;
        self.sink.stop();
        self.state = RequestState::Idle;
    }

    /// Current request state.
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Whether a request is in flight or speaking.
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }
}
