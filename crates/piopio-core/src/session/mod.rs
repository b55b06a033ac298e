//! Per-session conversation windows.
//!
//! - `ExpiringMap`: string-keyed map whose entries expire a fixed TTL after
//!   their last write, against an injectable [`Clock`](crate::clock::Clock)
//! - `SessionStore`: the port the chat relay reads and writes turns through
//! - `InMemorySessionStore`: the process-local implementation

pub mod expiring;
pub mod store;
