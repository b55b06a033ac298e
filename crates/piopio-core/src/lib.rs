//! Business logic and port definitions for the PíoPío relay.
//!
//! This crate defines the provider traits that the infrastructure layer
//! implements, the session store, and the two relays. It depends only on
//! `piopio-types` -- never on `piopio-infra` or any HTTP crate.

pub mod clock;
pub mod llm;
pub mod origin;
pub mod prompt;
pub mod relay;
pub mod session;
pub mod speech;
