//! Configuration for narration requests.

use std::time::Duration;

/// Default speech service base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default text-to-speech model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";
/// Default prebuilt voice.
pub const DEFAULT_VOICE: &str = "Kore";

/// Settings for talking to the speech service and decoding its audio.
#[derive(Clone)]
pub struct NarrationConfig {
    /// API key sent with every request. Requests fail without one.
    pub api_key: Option<String>,
    /// Base URL of the service.
    pub endpoint: String,
    /// Model name.
    pub model: String,
    /// Prebuilt voice name.
    pub voice: String,
    /// Sample rate of the returned PCM.
    pub sample_rate: u32,
    /// Channel count of the returned PCM.
    pub channels: u16,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for NarrationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrationConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("voice", &self.voice)
            .field("sample_rate", &self.sample_rate)
            .field("channels", &self.channels)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            sample_rate: 24_000,
            channels: 1,
            timeout: Duration::from_secs(60),
        }
    }
}

impl NarrationConfig {
    /// Defaults with the API key taken from `GEMINI_API_KEY`, or `API_KEY`
    /// if that is unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults with the API key resolved through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = ["GEMINI_API_KEY", "API_KEY"]
            .into_iter()
            .filter_map(&lookup)
            .find(|key| !key.trim().is_empty());
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the service base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the voice name.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Set the PCM sample rate.
    pub fn with_sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = rate;
        self
    }

    /// Set the PCM channel count.
    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full `generateContent` URL for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}
