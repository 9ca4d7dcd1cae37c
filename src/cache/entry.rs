//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry with its key, value and expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The key, kept so eviction from the list can clear the index
    pub key: K,
    /// The stored value
    pub value: V,
    /// Time to live, `Duration::ZERO` = no expiration
    pub ttl: Duration,
    /// Absolute expiration deadline, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new cache entry whose deadline is `now + ttl`.
    ///
    /// # Arguments
    /// * `key` - The key the entry is indexed by
    /// * `value` - The value to store
    /// * `ttl` - Time to live, zero for no expiration
    /// * `now` - Reference instant for the deadline
    pub fn new(key: K, value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            key,
            value,
            ttl,
            expires_at: deadline(ttl, now),
        }
    }

    // == Refresh ==
    /// Replaces the value and restarts the TTL relative to `now`.
    pub fn refresh(&mut self, value: V, ttl: Duration, now: Instant) {
        self.value = value;
        self.ttl = ttl;
        self.expires_at = deadline(ttl, now);
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now` reaches the deadline,
    /// so a TTL of `d` stops serving the value as soon as `d` has elapsed.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }
}

/// A zero TTL, or one too large to represent, never expires.
fn deadline(ttl: Duration, now: Instant) -> Option<Instant> {
    if ttl.is_zero() {
        None
    } else {
        now.checked_add(ttl)
    }
}
