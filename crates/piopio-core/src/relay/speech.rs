//! Speech relay: forwards text to the speech upstream and hands back the
//! audio stream. Stateless per call.

use tracing::{debug, error, warn};

use piopio_types::error::RelayError;
use piopio_types::speech::{SpeechRequest, VoiceSettings};

use crate::speech::AudioStream;
use crate::speech::box_provider::BoxSpeechProvider;

/// Relays text-to-speech requests.
///
/// `provider` is `None` when the speech API key or voice id is not
/// configured; every call then fails with [`RelayError::Configuration`].
pub struct SpeechRelay {
    provider: Option<BoxSpeechProvider>,
    model_id: String,
    voice_settings: VoiceSettings,
}

impl SpeechRelay {
    pub fn new(provider: Option<BoxSpeechProvider>, model_id: impl Into<String>) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
            voice_settings: VoiceSettings::default(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Synthesize `text` and return the upstream audio stream.
    pub async fn handle(&self, text: &str) -> Result<AudioStream, RelayError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RelayError::MissingField("message"));
        }

        let Some(provider) = &self.provider else {
            warn!("speech request rejected: speech provider not configured");
            return Err(RelayError::Configuration(
                "speech API key or voice id missing".to_string(),
            ));
        };

        let request = SpeechRequest {
            text: text.to_string(),
            model_id: self.model_id.clone(),
            voice_settings: self.voice_settings,
        };

        let audio = provider.synthesize(&request).await.map_err(|e| {
            error!(provider = provider.name(), error = %e, "speech upstream failed");
            RelayError::UpstreamFailure(e.to_string())
        })?;

        debug!(provider = provider.name(), chars = text.chars().count(), "speech relayed");
        Ok(audio)
    }
}
