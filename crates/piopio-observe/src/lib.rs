//! Observability setup for the PíoPío relay.

pub mod tracing_setup;
