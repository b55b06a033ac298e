//! LlmProvider trait definition.

use std::future::Future;

use piopio_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion backends.
///
/// Uses native async fn in traits (RPITIT). Implementations live in
/// piopio-infra (e.g., `OpenAiResponsesProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
