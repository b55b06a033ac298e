//! Infrastructure implementations for the PíoPío relay.
//!
//! Concrete [`LlmProvider`](piopio_core::llm::provider::LlmProvider) and
//! [`SpeechProvider`](piopio_core::speech::SpeechProvider) clients that talk
//! to the hosted upstream APIs over `reqwest`.

pub mod llm;
pub mod speech;
