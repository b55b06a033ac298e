//! Shared domain types for the PíoPío relay.
//!
//! Conversation turns, persona configuration, upstream request/response
//! shapes, and the error taxonomy shared by the core and HTTP layers.
//!
//! Zero infrastructure dependencies -- only serde, thiserror, secrecy.

pub mod chat;
pub mod error;
pub mod llm;
pub mod persona;
pub mod speech;
