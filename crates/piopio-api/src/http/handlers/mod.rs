//! Route handlers.

pub mod chat;
pub mod health;
pub mod tts;
