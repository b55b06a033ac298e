//! Application state wiring the relays to the concrete providers.
//!
//! The relays are generic over their session store; `AppState` pins the chat
//! relay to the in-memory store.

use std::sync::Arc;

use tracing::{info, warn};

use piopio_core::llm::box_provider::BoxLlmProvider;
use piopio_core::origin::OriginGuard;
use piopio_core::relay::{ChatRelay, SpeechRelay};
use piopio_core::session::store::InMemorySessionStore;
use piopio_core::speech::box_provider::BoxSpeechProvider;
use piopio_infra::llm::openai::OpenAiResponsesProvider;
use piopio_infra::speech::elevenlabs::ElevenLabsProvider;
use piopio_types::speech::SpeechError;

use crate::cli::Cli;

pub type ConcreteChatRelay = ChatRelay<InMemorySessionStore>;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ConcreteChatRelay>,
    pub speech: Arc<SpeechRelay>,
    pub origin_guard: Arc<OriginGuard>,
}

impl AppState {
    pub fn new(chat: ConcreteChatRelay, speech: SpeechRelay, origin_guard: OriginGuard) -> Self {
        Self {
            chat: Arc::new(chat),
            speech: Arc::new(speech),
            origin_guard: Arc::new(origin_guard),
        }
    }

    /// Build the state from parsed configuration.
    ///
    /// Missing upstream credentials do not prevent startup: `/chat` and
    /// `/tts` fail per request instead.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let persona = cli.persona();

        let openai_key = cli.openai_api_key();
        if openai_key.is_none() {
            warn!("OPENAI_API_KEY is not set; /chat requests will fail");
        }
        let llm = OpenAiResponsesProvider::new(openai_key)?.with_base_url(&cli.openai_base_url);

        let store = Arc::new(InMemorySessionStore::new(cli.session_ttl()));
        let chat = ChatRelay::new(store, BoxLlmProvider::new(llm), persona);

        let speech_config = cli.speech_config();
        let model_id = speech_config.model_id.clone();
        let speech_provider = match ElevenLabsProvider::from_config(speech_config) {
            Ok(provider) => Some(BoxSpeechProvider::new(
                provider.with_base_url(&cli.elevenlabs_base_url),
            )),
            Err(SpeechError::NotConfigured) => {
                warn!("ELEVENLABS_API_KEY or ELEVENLABS_VOICE_ID is not set; /tts requests will fail");
                None
            }
            Err(e) => return Err(e.into()),
        };
        let speech = SpeechRelay::new(speech_provider, model_id);

        let origin_guard = OriginGuard::parse(&cli.allowed_origin);
        info!(
            persona = %chat.persona().name,
            model = %chat.persona().model,
            origins = ?origin_guard.allowed(),
            speech = speech.is_configured(),
            session_ttl_secs = chat.store().ttl().as_secs(),
            "relay configured"
        );

        Ok(Self::new(chat, speech, origin_guard))
    }
}
