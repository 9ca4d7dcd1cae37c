//! Cache Contract Module
//!
//! The caller-facing cache interface, so code can depend on the contract
//! rather than on [`LruCache`] itself.

use std::hash::Hash;
use std::time::Duration;

use crate::cache::LruCache;

// == Cache Trait ==
/// Bounded key/value cache with optional per-entry expiration.
///
/// All methods take `&self`; implementations handle their own locking.
/// The trait is object safe, so callers may hold a `&dyn Cache<K, V>`.
pub trait Cache<K, V> {
    /// Returns the configured capacity.
    fn cap(&self) -> usize;

    /// Removes every entry.
    fn clear(&self);

    /// Stores a key-value pair that never expires.
    fn add(&self, key: K, value: V) {
        self.add_with_ttl(key, value, Duration::ZERO);
    }

    /// Stores a key-value pair that expires once `ttl` has elapsed
    /// (`Duration::ZERO` = never).
    fn add_with_ttl(&self, key: K, value: V, ttl: Duration);

    /// Returns the value if present and unexpired.
    fn get(&self, key: &K) -> Option<V>;

    /// Removes an entry. Absent keys are ignored.
    fn remove(&self, key: &K);
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn cap(&self) -> usize {
        LruCache::cap(self)
    }

    fn clear(&self) {
        LruCache::clear(self);
    }

    fn add(&self, key: K, value: V) {
        LruCache::add(self, key, value);
    }

    fn add_with_ttl(&self, key: K, value: V, ttl: Duration) {
        LruCache::add_with_ttl(self, key, value, ttl);
    }

    fn get(&self, key: &K) -> Option<V> {
        LruCache::get(self, key)
    }

    fn remove(&self, key: &K) {
        LruCache::remove(self, key);
    }
}
