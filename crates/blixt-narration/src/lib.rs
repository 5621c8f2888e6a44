//! Spoken narration for Blixt.
//!
//! A step's text is sent to a speech service, the returned base64 PCM is
//! decoded into an [`AudioBuffer`], and the buffer is handed to an
//! [`AudioSink`]. The [`Narrator`] keeps at most one request alive and
//! swallows every failure after logging it.

/// Speech service client.
pub mod client;
/// Base64 and PCM decoding.
pub mod codec;
/// Narration configuration.
pub mod config;
/// Error types for the narration crate.
pub mod error;
/// Single-flight request state machine.
pub mod narrator;
/// Speech service wire types.
pub mod request;
/// Audio output.
pub mod sink;

pub use client::{GeminiClient, SpeechSynthesizer};
pub use codec::{AudioBuffer, decode_base64, decode_pcm, decode_payload};
pub use config::NarrationConfig;
pub use error::{NarrationError, NarrationResult};
pub use narrator::{NarrationOutcome, Narrator, RequestState};
#[cfg(feature = "playback")]
pub use sink::RodioSink;
pub use sink::{AudioSink, SilentSink};
