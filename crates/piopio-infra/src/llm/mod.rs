//! Completion provider implementations.

pub mod openai;
