//! DashMap-backed map with per-entry time-to-live.
//!
//! Expiry is measured from the last write. Expired entries are never
//! returned: `get` checks the deadline and drops stale entries on access,
//! and `purge_expired` reclaims everything past its deadline in one pass.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::clock::{Clock, SystemClock};

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Thread-safe map with a fixed TTL per entry and no size-based eviction.
pub struct ExpiringMap<V, C: Clock = SystemClock> {
    entries: DashMap<String, Entry<V>>,
    ttl: Duration,
    clock: C,
}

impl<V: Clone> ExpiringMap<V, SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<V: Clone, C: Clock> ExpiringMap<V, C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a value by key. Returns `None` if missing or expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();

        let expired = match self.entries.get(key) {
            Some(entry) if now < entry.expires_at => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            // Re-check under the shard lock: a concurrent write may have
            // refreshed the entry since the read above.
            self.entries.remove_if(key, |_, entry| now >= entry.expires_at);
        }

        None
    }

    /// Insert or replace a value, resetting its deadline to now + TTL.
    pub fn insert(&self, key: &str, value: V) {
        let expires_at = self.clock.now() + self.ttl;
        self.entries
            .insert(key.to_string(), Entry { value, expires_at });
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| now < entry.expires_at);
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
