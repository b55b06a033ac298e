//! Speech-synthesis provider abstractions.
//!
//! Mirrors the completion side: an RPITIT `SpeechProvider` trait for
//! concrete clients and a `BoxSpeechProvider` for dynamic dispatch.

pub mod box_provider;
pub mod provider;

pub use provider::{AudioStream, SpeechProvider};
