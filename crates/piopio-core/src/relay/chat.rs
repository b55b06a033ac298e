//! Chat relay: session window + completion upstream.
//!
//! One call reads the session, appends the user turn, asks the upstream for
//! a reply and persists both turns. State is written only after the
//! upstream call succeeds.
//!
//! Concurrent calls for the same session are not serialized. Two requests
//! that read the same history each persist their own window and the later
//! write wins.

use std::sync::Arc;

use tracing::{debug, error};

use piopio_types::chat::{Turn, truncate_window};
use piopio_types::error::RelayError;
use piopio_types::llm::CompletionRequest;
use piopio_types::persona::PersonaConfig;

use crate::llm::box_provider::BoxLlmProvider;
use crate::prompt::SystemPromptBuilder;
use crate::session::store::SessionStore;

/// Orchestrates a single chat exchange.
///
/// Generic over `SessionStore` so tests can inject a store driven by a
/// manual clock.
pub struct ChatRelay<S: SessionStore> {
    store: Arc<S>,
    provider: BoxLlmProvider,
    persona: PersonaConfig,
    system_prompt: String,
}

impl<S: SessionStore> ChatRelay<S> {
    pub fn new(store: Arc<S>, provider: BoxLlmProvider, persona: PersonaConfig) -> Self {
        let system_prompt = SystemPromptBuilder::build(&persona);
        Self {
            store,
            provider,
            persona,
            system_prompt,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn persona(&self) -> &PersonaConfig {
        &self.persona
    }

    /// Relay `message` within `session_id` and return the assistant's reply.
    pub async fn handle(&self, message: &str, session_id: &str) -> Result<String, RelayError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(RelayError::MissingField("message"));
        }
        let session_id = session_id.trim();
        if session_id.is_empty() {
            return Err(RelayError::MissingField("sessionId"));
        }

        let mut turns = self.store.get(session_id);
        turns.push(Turn::user(message));
        truncate_window(&mut turns);

        let request = self.build_request(&turns);

        let response = self.provider.complete(&request).await.map_err(|e| {
            error!(
                provider = self.provider.name(),
                session_id,
                error = %e,
                "completion upstream failed"
            );
            RelayError::UpstreamFailure(e.to_string())
        })?;

        let output = response
            .output_text
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();

        turns.push(Turn::assistant(output.clone()));
        truncate_window(&mut turns);
        let stored = turns.len();
        self.store.put(session_id, turns);

        debug!(
            session_id,
            model = %response.model,
            stored_turns = stored,
            "chat turn relayed"
        );

        Ok(output)
    }

    fn build_request(&self, turns: &[Turn]) -> CompletionRequest {
        CompletionRequest {
            model: self.persona.model.clone(),
            messages: turns.iter().cloned().map(Into::into).collect(),
            system: Some(self.system_prompt.clone()),
            max_output_tokens: self.persona.max_output_tokens,
        }
    }
}
