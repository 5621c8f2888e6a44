/// Result alias for narration operations.
pub type NarrationResult<T> = Result<T, NarrationError>;

/// Why a narration did not play.
#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    /// A request is still in flight or its audio is still playing.
    #[error("a narration is already in progress")]
    Busy,

    /// Neither key variable is set.
    #[error("no API key: set GEMINI_API_KEY or API_KEY")]
    MissingApiKey,

    /// The HTTP request could not be completed.
    #[error("speech service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("speech service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for the log.
        body: String,
    },

    /// The response had no inline audio part.
    #[error("speech service response contained no audio")]
    MissingAudio,

    /// The audio payload was not valid base64.
    #[error("malformed base64 audio: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Zero channels or a zero sample rate.
    #[error("invalid audio format: {0}")]
    InvalidFormat(String),

    /// The output device refused the buffer.
    #[error("audio playback failed: {0}")]
    Playback(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    #[test]
    fn status_error_names_code_and_body() {
        let err = NarrationError::Status {
            status: 429,
            body: "quota".into(),
        };
        assert_eq!(err.to_string(), "speech service returned 429: quota");
    }

    #[test]
    fn base64_errors_convert() {
        let decoded = base64::engine::general_purpose::STANDARD.decode("not base64!");
        let err: NarrationError = decoded.unwrap_err().into();
        assert!(matches!(err, NarrationError::Base64(_)));
        assert!(err.to_string().starts_with("malformed base64 audio"));
    }
}
