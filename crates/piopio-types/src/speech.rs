//! Speech-synthesis request types and configuration.

use secrecy::SecretString;
use serde::Serialize;

/// Default synthesis model identifier.
pub const DEFAULT_SPEECH_MODEL: &str = "eleven_multilingual_v2";

/// Voice-quality parameters sent with every synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}

/// A single text-to-speech request.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub model_id: String,
    pub voice_settings: VoiceSettings,
}

/// Server-side speech configuration.
///
/// Both `api_key` and `voice_id` must be present for the speech endpoint
/// to work; see [`SpeechConfig::is_complete`].
#[derive(Debug)]
pub struct SpeechConfig {
    pub api_key: Option<SecretString>,
    pub voice_id: Option<String>,
    pub model_id: String,
}

impl SpeechConfig {
    pub fn is_complete(&self) -> bool {
        self.api_key.is_some() && self.voice_id.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            voice_id: None,
            model_id: DEFAULT_SPEECH_MODEL.to_string(),
        }
    }
}

/// Errors from speech provider operations.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech provider not configured")]
    NotConfigured,

    #[error("speech request failed: {0}")]
    Transport(String),

    #[error("speech provider returned HTTP {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("audio stream error: {0}")]
    Stream(String),
}
