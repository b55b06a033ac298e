//! Request relays sitting between the HTTP handlers and the upstreams.

pub mod chat;
pub mod speech;

pub use chat::ChatRelay;
pub use speech::SpeechRelay;
