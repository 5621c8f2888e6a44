//! The speech service seam and its HTTP implementation.

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::config::NarrationConfig;
use crate::error::{NarrationError, NarrationResult};
use crate::request::{GenerateRequest, GenerateResponse};

/// Anything that turns a prompt into base64-encoded PCM.
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize speech for `prompt`, returning the base64 audio payload.
    fn synthesize(&self, prompt: &str) -> NarrationResult<String>;
}

/// Blocking client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: NarrationConfig,
}

impl GeminiClient {
    /// Build a client. Fails without an API key.
    pub fn new(config: NarrationConfig) -> NarrationResult<Self> {
        if config.api_key.is_none() {
            return Err(NarrationError::MissingApiKey);
        }
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// The settings this client was built with.
    pub fn config(&self) -> &NarrationConfig {
        &self.config
    }
}

impl SpeechSynthesizer for GeminiClient {
    fn synthesize(&self, prompt: &str) -> NarrationResult<String> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NarrationError::MissingApiKey)?;
        let url = self.config.generate_url();
        info!(model = %self.config.model, voice = %self.config.voice, "requesting narration");
        debug!(%url, chars = prompt.chars().count(), "generateContent");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&GenerateRequest::speech(prompt, &self.config.voice))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NarrationError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let body: GenerateResponse = response.json()?;
        body.audio_data()
            .map(str::to_owned)
            .ok_or(NarrationError::MissingAudio)
    }
}
