//! Speech-synthesis provider implementations.

pub mod elevenlabs;
