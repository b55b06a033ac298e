//! HTTP layer for the relay.
//!
//! Three `GET` routes (`/chat`, `/tts`, `/health`) behind an origin guard,
//! CORS, and request tracing.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod origin;
pub mod router;
