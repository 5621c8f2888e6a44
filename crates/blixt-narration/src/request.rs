//! Wire types for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

/// Request body asking for spoken audio of `text`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Prompt contents.
    pub contents: Vec<Content>,
    /// Output settings.
    pub generation_config: GenerationConfig,
}

impl GenerateRequest {
    /// A single-text request for audio in the given voice.
    pub fn speech(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(text.into()),
                    inline_data: None,
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.into(),
                        },
                    },
                },
            },
        }
    }
}

/// A list of parts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    /// The parts, in order.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Either text or inline binary data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base64 payload with its MIME type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

/// Inline base64 data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type, e.g. `audio/L16;codec=pcm;rate=24000`.
    #[serde(default)]
    pub mime_type: String,
    /// Base64 text.
    pub data: String,
}

/// Output settings for the request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Always `["AUDIO"]` for speech.
    pub response_modalities: Vec<String>,
    /// Voice selection.
    pub speech_config: SpeechConfig,
}

/// Wrapper around the voice choice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    /// The voice to speak with.
    pub voice_config: VoiceConfig,
}

/// Voice settings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    /// One of the service's built-in voices.
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

/// A built-in voice by name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    /// For example `Kore`.
    pub voice_name: String,
}

/// Response body. Only the fields needed to find the audio are read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    /// Generated candidates.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    /// The candidate's content.
    #[serde(default)]
    pub content: Content,
}

impl GenerateResponse {
    /// Base64 audio of the first part of the first candidate, if present.
    pub fn audio_data(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .first()?
            .inline_data
            .as_ref()
            .map(|inline| inline.data.as_str())
            .filter(|data| !data.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_in_service_shape() {
        let req = GenerateRequest::speech("Hej", "Kore");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{ "parts": [{ "text": "Hej" }] }],
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": {
                        "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": "Kore" } }
                    }
                }
            })
        );
    }

    #[test]
    fn audio_is_read_from_first_part() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{
                        "inlineData": {
                            "mimeType": "audio/L16;codec=pcm;rate=24000",
                            "data": "AEAAwA=="
                        }
                    }]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {}
        }"#;
        let resp: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.audio_data(), Some("AEAAwA=="));
    }

    #[test]
    fn missing_audio_is_none() {
        let cases = [
            "{}",
            r#"{"candidates": []}"#,
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"text": "no audio"}]}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"inlineData": {"data": ""}}]}}]}"#,
        ];
        for body in cases {
            let resp: GenerateResponse = serde_json::from_str(body).unwrap();
            assert!(resp.audio_data().is_none(), "{body}");
        }
    }
}
