//! SessionStore trait and the in-memory implementation.

use std::time::Duration;

use piopio_types::chat::Turn;

use crate::clock::{Clock, SystemClock};
use crate::session::expiring::ExpiringMap;

/// Idle time after which a session's turns are discarded.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Storage port for per-session turn windows.
///
/// A `get` that follows a `put` within the TTL observes exactly what was
/// written. Expired sessions read as empty.
pub trait SessionStore: Send + Sync {
    /// Turns for `session_id`, or an empty vector if absent or expired.
    fn get(&self, session_id: &str) -> Vec<Turn>;

    /// Replace the turns for `session_id` and restart its TTL.
    fn put(&self, session_id: &str, turns: Vec<Turn>);

    /// Reclaim expired sessions. Returns how many were dropped.
    fn purge_expired(&self) -> usize {
        0
    }
}

/// Process-local session store backed by an [`ExpiringMap`].
pub struct InMemorySessionStore<C: Clock = SystemClock> {
    sessions: ExpiringMap<Vec<Turn>, C>,
}

impl InMemorySessionStore<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: ExpiringMap::new(ttl),
        }
    }
}

impl Default for InMemorySessionStore<SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl<C: Clock> InMemorySessionStore<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            sessions: ExpiringMap::with_clock(ttl, clock),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.sessions.ttl()
    }

    /// Number of stored sessions, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl<C: Clock> SessionStore for InMemorySessionStore<C> {
    fn get(&self, session_id: &str) -> Vec<Turn> {
        self.sessions.get(session_id).unwrap_or_default()
    }

    fn put(&self, session_id: &str, turns: Vec<Turn>) {
        self.sessions.insert(session_id, turns);
    }

    fn purge_expired(&self) -> usize {
        self.sessions.purge_expired()
    }
}
