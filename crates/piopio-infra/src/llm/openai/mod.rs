//! OpenAiResponsesProvider -- [`LlmProvider`] for the OpenAI Responses API.
//!
//! Sends non-streaming requests to `/v1/responses`. The system instruction
//! is sent as the first `input` message, ahead of the conversation turns.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use piopio_core::llm::provider::LlmProvider;
use piopio_types::llm::{CompletionRequest, CompletionResponse, LlmError, MessageRole};

use self::types::{InputMessage, ResponsesRequest, ResponsesResponse};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Completion provider for OpenAI's Responses API.
///
/// Does NOT derive Debug; the API key must never reach log output.
pub struct OpenAiResponsesProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
}

impl OpenAiResponsesProvider {
    /// Create a provider. With no API key every call fails with
    /// [`LlmError::AuthenticationFailed`] without contacting the upstream.
    pub fn new(api_key: Option<SecretString>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        })
    }

    /// Override the base URL (proxies, gateways, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a generic [`CompletionRequest`] into a [`ResponsesRequest`].
    fn to_responses_request(request: &CompletionRequest) -> ResponsesRequest {
        let system = request.system.iter().map(|s| InputMessage {
            role: MessageRole::System.to_string(),
            content: s.clone(),
        });

        let turns = request.messages.iter().map(|m| InputMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        });

        ResponsesRequest {
            model: request.model.clone(),
            input: system.chain(turns).collect(),
            max_output_tokens: request.max_output_tokens,
        }
    }
}

impl LlmProvider for OpenAiResponsesProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let Some(api_key) = &self.api_key else {
            return Err(LlmError::AuthenticationFailed);
        };

        let body = Self::to_responses_request(request);
        debug!(model = %body.model, inputs = body.input.len(), "sending responses request");

        let response = self
            .client
            .post(self.url("/v1/responses"))
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited,
                400 => LlmError::InvalidRequest(error_body),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let parsed: ResponsesResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        Ok(CompletionResponse {
            output_text: parsed.text(),
            id: parsed.id,
            model: parsed.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use piopio_types::llm::Message;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4.1-mini".to_string(),
            messages: vec![
                Message {
                    role: MessageRole::User,
                    content: "Hola".to_string(),
                },
                Message {
                    role: MessageRole::Assistant,
                    content: "¡Hola!".to_string(),
                },
                Message {
                    role: MessageRole::User,
                    content: "¿Qué tal?".to_string(),
                },
            ],
            system: Some("Eres PíoPío AI.".to_string()),
            max_output_tokens: 90,
        }
    }

    fn provider(server: &MockServer) -> OpenAiResponsesProvider {
        OpenAiResponsesProvider::new(Some(SecretString::from("test-key-123")))
            .unwrap()
            .with_base_url(server.uri())
    }

    #[test]
    fn test_system_prompt_goes_first() {
        let body = OpenAiResponsesProvider::to_responses_request(&request());
        let roles: Vec<&str> = body.input.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(body.input[0].content, "Eres PíoPío AI.");
        assert_eq!(body.max_output_tokens, 90);
    }

    #[test]
    fn test_base_url_override_strips_trailing_slash() {
        let provider = OpenAiResponsesProvider::new(None)
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(provider.url("/v1/responses"), "http://localhost:8080/v1/responses");
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .and(header("Authorization", "Bearer test-key-123"))
            .and(body_json(serde_json::json!({
                "model": "gpt-4.1-mini",
                "input": [
                    {"role": "system", "content": "Eres PíoPío AI."},
                    {"role": "user", "content": "Hola"},
                    {"role": "assistant", "content": "¡Hola!"},
                    {"role": "user", "content": "¿Qué tal?"}
                ],
                "max_output_tokens": 90
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "resp_abc",
                "model": "gpt-4.1-mini-2025-04-14",
                "output": [{
                    "type": "message",
                    "role": "assistant",
                    "content": [{"type": "output_text", "text": "¡Muy bien! 🐣"}]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = provider(&server).complete(&request()).await.unwrap();
        assert_eq!(resp.id, "resp_abc");
        assert_eq!(resp.output_text.as_deref(), Some("¡Muy bien! 🐣"));
    }

    #[tokio::test]
    async fn test_complete_without_text_output() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "resp_empty",
                "model": "gpt-4.1-mini",
                "output": []
            })))
            .mount(&server)
            .await;

        let resp = provider(&server).complete(&request()).await.unwrap();
        assert!(resp.output_text.is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_failed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided"}
            })))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::RateLimited));
    }

    #[tokio::test]
    async fn test_server_error_keeps_detail() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request()).await.unwrap_err();
        assert!(err.to_string().contains("overloaded"));
    }

    #[tokio::test]
    async fn test_missing_key_skips_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = OpenAiResponsesProvider::new(None)
            .unwrap()
            .with_base_url(server.uri());
        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }
}
