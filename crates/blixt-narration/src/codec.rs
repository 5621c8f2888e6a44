//! Base64 and 16-bit PCM decoding.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{NarrationError, NarrationResult};

const BYTES_PER_SAMPLE: usize = 2;
const SCALE: f32 = 32768.0;

/// Decoded audio, one sample vector per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Samples per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels.
    pub fn channel_count(&self) -> u16 {
        // decode_pcm takes the count as u16, so this never truncates.
        self.channels.len() as u16
    }

    /// Samples per channel.
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Playback length.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count() as f64 / f64::from(self.sample_rate))
    }

    /// Samples of one channel.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Whether there are no frames at all.
    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Largest absolute sample value over all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0_f32, |peak, s| peak.max(s.abs()))
    }

    /// Samples re-interleaved frame by frame, as output devices expect.
    pub fn interleaved(&self) -> Vec<f32> {
        let frames = self.frame_count();
        let mut out = Vec::with_capacity(frames * self.channels.len());
        for frame in 0..frames {
            for channel in &self.channels {
                out.push(channel[frame]);
            }
        }
        out
    }
}

/// Decode standard base64 with padding. Surrounding whitespace is ignored.
pub fn decode_base64(text: &str) -> NarrationResult<Vec<u8>> {
    Ok(STANDARD.decode(text.trim())?)
}

/// Decode signed 16-bit little-endian interleaved PCM.
///
/// Each sample is divided by 32768. A trailing partial frame is dropped.
pub fn decode_pcm(bytes: &[u8], sample_rate: u32, channels: u16) -> NarrationResult<AudioBuffer> {
    if channels == 0 {
        return Err(NarrationError::InvalidFormat("channel count must be at least 1".into()));
    }
    if sample_rate == 0 {
        return Err(NarrationError::InvalidFormat("sample rate must be positive".into()));
    }

    let channel_count = usize::from(channels);
    let frame_bytes = BYTES_PER_SAMPLE * channel_count;
    let frames = bytes.len() / frame_bytes;
    let mut out: Vec<Vec<f32>> = (0..channel_count)
        .map(|_| Vec::with_capacity(frames))
        .collect();

    for frame in bytes.chunks_exact(frame_bytes) {
        for (channel, sample) in out.iter_mut().zip(frame.chunks_exact(BYTES_PER_SAMPLE)) {
            let value = i16::from_le_bytes([sample[0], sample[1]]);
            channel.push(f32::from(value) / SCALE);
        }
    }

    Ok(AudioBuffer {
        sample_rate,
        channels: out,
    })
}

/// Base64 text straight to an [`AudioBuffer`].
pub fn decode_payload(text: &str, sample_rate: u32, channels: u16) -> NarrationResult<AudioBuffer> {
    let bytes = decode_base64(text)?;
    decode_pcm(&bytes, sample_rate, channels)
}
