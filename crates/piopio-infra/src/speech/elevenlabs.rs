//! ElevenLabsProvider -- [`SpeechProvider`] for the ElevenLabs TTS API.
//!
//! `POST /v1/text-to-speech/{voice_id}` with the `xi-api-key` header. On
//! success the MP3 body is passed through as a byte stream; on failure the
//! diagnostic body is captured in the error for server-side logging.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use piopio_core::speech::{AudioStream, SpeechProvider};
use piopio_types::speech::{SpeechConfig, SpeechError, SpeechRequest, VoiceSettings};

pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";

/// Request body for the text-to-speech endpoint.
#[derive(Debug, Serialize)]
struct TtsBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

/// ElevenLabs text-to-speech client bound to a single voice.
///
/// Does NOT derive Debug; the API key must never reach log output.
pub struct ElevenLabsProvider {
    client: reqwest::Client,
    api_key: SecretString,
    voice_id: String,
    base_url: String,
}

impl ElevenLabsProvider {
    pub fn new(api_key: SecretString, voice_id: impl Into<String>) -> Result<Self, SpeechError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| SpeechError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            voice_id: voice_id.into(),
            base_url: DEFAULT_ELEVENLABS_BASE_URL.to_string(),
        })
    }

    /// Build a provider from [`SpeechConfig`], or
    /// [`SpeechError::NotConfigured`] if the key or voice id is missing.
    pub fn from_config(config: SpeechConfig) -> Result<Self, SpeechError> {
        if !config.is_complete() {
            return Err(SpeechError::NotConfigured);
        }
        match (config.api_key, config.voice_id) {
            (Some(api_key), Some(voice_id)) => Self::new(api_key, voice_id.trim()),
            _ => Err(SpeechError::NotConfigured),
        }
    }

    /// Override the base URL (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Endpoint URL with the voice id percent-encoded as one path segment.
    fn url(&self) -> Result<Url, SpeechError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SpeechError::Transport(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| SpeechError::Transport("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["v1", "text-to-speech", self.voice_id.as_str()]);
        Ok(url)
    }
}

impl SpeechProvider for ElevenLabsProvider {
    fn name(&self) -> &str {
        "elevenlabs"
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<AudioStream, SpeechError> {
        let body = TtsBody {
            text: &request.text,
            model_id: &request.model_id,
            voice_settings: request.voice_settings,
        };

        debug!(voice_id = %self.voice_id, model_id = %request.model_id, "sending tts request");

        let response = self
            .client
            .post(self.url()?)
            .header("xi-api-key", self.api_key.expose_secret())
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| SpeechError::Stream(e.to_string())));

        Ok(Box::pin(stream))
    }
}
