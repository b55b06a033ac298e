//! Axum router configuration with middleware.
//!
//! Middleware, outermost first: request tracing, origin enforcement, CORS.
//! The origin check runs before CORS so a disallowed preflight is refused
//! rather than answered.

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::origin::{cors_layer, enforce_origin};
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(state.origin_guard.clone());

    Router::new()
        .route("/chat", get(handlers::chat::chat))
        .route("/tts", get(handlers::tts::tts))
        .route("/health", get(handlers::health::health))
        .layer(cors)
        .layer(middleware::from_fn_with_state(state.clone(), enforce_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use futures_util::stream;

    use piopio_core::llm::box_provider::BoxLlmProvider;
    use piopio_core::llm::provider::LlmProvider;
    use piopio_core::origin::OriginGuard;
    use piopio_core::relay::{ChatRelay, SpeechRelay};
    use piopio_core::session::store::{DEFAULT_SESSION_TTL, InMemorySessionStore};
    use piopio_core::speech::box_provider::BoxSpeechProvider;
    use piopio_core::speech::{AudioStream, SpeechProvider};
    use piopio_types::llm::{CompletionRequest, CompletionResponse, LlmError};
    use piopio_types::persona::PersonaConfig;
    use piopio_types::speech::{DEFAULT_SPEECH_MODEL, SpeechError, SpeechRequest};

    struct FakeLlm {
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl LlmProvider for FakeLlm {
        fn name(&self) -> &str {
            "fake-llm"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LlmError::Provider {
                    message: "HTTP 401: sk-leaked-detail".to_string(),
                });
            }
            Ok(CompletionResponse {
                id: "resp_1".to_string(),
                model: request.model.clone(),
                output_text: Some("  ¡Hola! 🐣\n".to_string()),
            })
        }
    }

    struct FakeSpeech {
        fail: bool,
    }

    impl SpeechProvider for FakeSpeech {
        fn name(&self) -> &str {
            "fake-speech"
        }

        async fn synthesize(&self, _request: &SpeechRequest) -> Result<AudioStream, SpeechError> {
            if self.fail {
                return Err(SpeechError::Provider {
                    status: 401,
                    body: "invalid_api_key".to_string(),
                });
            }
            let chunks: Vec<Result<Bytes, SpeechError>> = vec![
                Ok(Bytes::from_static(b"ID3")),
                Ok(Bytes::from_static(b"-mp3-frames")),
            ];
            Ok(Box::pin(stream::iter(chunks)))
        }
    }

    struct Harness {
        base: String,
        llm_calls: Arc<AtomicUsize>,
        client: reqwest::Client,
    }

    async fn spawn(allowed_origin: &str, llm_fail: bool, speech: Option<bool>) -> Harness {
        let llm_calls = Arc::new(AtomicUsize::new(0));
        let llm = FakeLlm {
            fail: llm_fail,
            calls: llm_calls.clone(),
        };
        let chat = ChatRelay::new(
            Arc::new(InMemorySessionStore::new(DEFAULT_SESSION_TTL)),
            BoxLlmProvider::new(llm),
            PersonaConfig::default(),
        );
        let speech_provider = speech.map(|fail| BoxSpeechProvider::new(FakeSpeech { fail }));
        let speech = SpeechRelay::new(speech_provider, DEFAULT_SPEECH_MODEL);
        let state = AppState::new(chat, speech, OriginGuard::parse(allowed_origin));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });

        Harness {
            base: format!("http://{addr}"),
            llm_calls,
            client: reqwest::Client::new(),
        }
    }

    impl Harness {
        async fn get(&self, path: &str, origin: Option<&str>) -> reqwest::Response {
            let mut req = self.client.get(format!("{}{}", self.base, path));
            if let Some(origin) = origin {
                req = req.header("origin", origin);
            }
            req.send().await.unwrap()
        }
    }

    async fn json(resp: reqwest::Response) -> serde_json::Value {
        resp.json().await.unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let h = spawn("*", false, None).await;
        let resp = h.get("/health", None).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(json(resp).await, serde_json::json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_chat_success_trims_output() {
        let h = spawn("*", false, None).await;
        let resp = h.get("/chat?message=Hola&sessionId=abc", None).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(json(resp).await, serde_json::json!({"output": "¡Hola! 🐣"}));
        assert_eq!(h.llm_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_chat_missing_fields() {
        let h = spawn("*", false, None).await;

        let resp = h.get("/chat?sessionId=abc", None).await;
        assert_eq!(resp.status(), 400);
        assert_eq!(json(resp).await, serde_json::json!({"error": "Missing message"}));

        let resp = h.get("/chat?message=%20%20&sessionId=abc", None).await;
        assert_eq!(resp.status(), 400);
        assert_eq!(json(resp).await, serde_json::json!({"error": "Missing message"}));

        let resp = h.get("/chat?message=Hola", None).await;
        assert_eq!(resp.status(), 400);
        assert_eq!(json(resp).await, serde_json::json!({"error": "Missing sessionId"}));

        assert_eq!(h.llm_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chat_repeated_query_key_uses_first_value() {
        let h = spawn("*", false, None).await;
        let resp = h.get("/chat?message=a&message=b&sessionId=abc", None).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(json(resp).await, serde_json::json!({"output": "¡Hola! 🐣"}));
    }

    #[tokio::test]
    async fn test_tts_repeated_query_key_uses_first_value() {
        let h = spawn("*", false, Some(false)).await;
        let resp = h.get("/tts?message=Hola&message=Chao", None).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "audio/mpeg");
    }

    #[tokio::test]
    async fn test_chat_upstream_failure_is_generic() {
        let h = spawn("*", true, None).await;
        let resp = h.get("/chat?message=Hola&sessionId=abc", None).await;
        assert_eq!(resp.status(), 500);
        let body = resp.text().await.unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({"error": "Chat failed"})
        );
        assert!(!body.contains("sk-leaked-detail"));
    }

    #[tokio::test]
    async fn test_tts_streams_audio() {
        let h = spawn("*", false, Some(false)).await;
        let resp = h.get("/tts?message=Hola", None).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "audio/mpeg");
        assert_eq!(resp.headers()["cache-control"], "no-store");
        assert_eq!(resp.bytes().await.unwrap().as_ref(), b"ID3-mp3-frames");
    }

    #[tokio::test]
    async fn test_tts_missing_message_checked_first() {
        let h = spawn("*", false, None).await;
        let resp = h.get("/tts", None).await;
        assert_eq!(resp.status(), 400);
        assert_eq!(json(resp).await, serde_json::json!({"error": "Missing message"}));
    }

    #[tokio::test]
    async fn test_tts_missing_config() {
        let h = spawn("*", false, None).await;
        let resp = h.get("/tts?message=Hola", None).await;
        assert_eq!(resp.status(), 500);
        assert_eq!(
            json(resp).await,
            serde_json::json!({"error": "Missing ElevenLabs config"})
        );
    }

    #[tokio::test]
    async fn test_tts_upstream_failure() {
        let h = spawn("*", false, Some(true)).await;
        let resp = h.get("/tts?message=Hola", None).await;
        assert_eq!(resp.status(), 500);
        assert_eq!(json(resp).await, serde_json::json!({"error": "TTS failed"}));
    }

    #[tokio::test]
    async fn test_disallowed_origin_rejected_before_upstream() {
        let h = spawn("https://piopio.app", false, None).await;
        let resp = h
            .get("/chat?message=Hola&sessionId=abc", Some("https://evil.example"))
            .await;
        assert_eq!(resp.status(), 403);
        assert_eq!(json(resp).await, serde_json::json!({"error": "Origin not allowed"}));
        assert_eq!(h.llm_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_allowed_origin_gets_cors_header() {
        let h = spawn("https://piopio.app, https://www.piopio.app", false, None).await;
        let resp = h
            .get("/chat?message=Hola&sessionId=abc", Some("https://www.piopio.app"))
            .await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()["access-control-allow-origin"],
            "https://www.piopio.app"
        );
    }

    #[tokio::test]
    async fn test_request_without_origin_is_allowed() {
        let h = spawn("https://piopio.app", false, None).await;
        let resp = h.get("/health", None).await;
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn test_wildcard_allows_any_origin() {
        let h = spawn("*", false, None).await;
        let resp = h.get("/health", Some("https://anything.example")).await;
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().contains_key("access-control-allow-origin"));
    }
}
