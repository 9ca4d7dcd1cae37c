//! Shared Cache Module
//!
//! Thread-safe LRU cache: a [`CacheStore`] behind a single exclusive lock.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::CacheStore;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Bounded, thread-safe key/value cache with LRU eviction and lazy TTL expiration.
///
/// Every operation holds one lock for its whole duration, so the recency order
/// is exact across threads. Share it between threads with `Arc<LruCache<K, V>>`.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use lru_ttl_cache::LruCache;
///
/// let cache = LruCache::new(3);
/// cache.add("key1", "value1");
/// cache.add_with_ttl("key2", "value2", Duration::from_secs(60));
///
/// assert_eq!(cache.get("key1"), Some("value1"));
/// cache.remove("key1");
/// assert_eq!(cache.get("key1"), None);
/// ```
pub struct LruCache<K, V> {
    inner: Mutex<CacheStore<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructors ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 is accepted and yields a cache that retains nothing;
    /// use [`LruCache::try_new`] to reject it.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheStore::new(capacity)),
        }
    }

    /// Creates an empty cache, rejecting a capacity of 0.
    pub fn try_new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self::new(capacity))
    }

    /// Creates an empty cache from validated configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.capacity))
    }

    // == Add ==
    /// Stores a key-value pair that never expires.
    ///
    /// May evict the least recently used entry if the cache is full.
    pub fn add(&self, key: K, value: V) {
        self.inner.lock().add(key, value);
    }

    // == Add With TTL ==
    /// Stores a key-value pair that expires once `ttl` has elapsed.
    ///
    /// `Duration::ZERO` means no expiration. Re-adding an existing key replaces
    /// its value, restarts its TTL and marks it most recently used.
    pub fn add_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.inner.lock().add_with_ttl(key, value, ttl);
    }

    // == Get ==
    /// Returns a clone of the value if present and unexpired, marking it most
    /// recently used. Expired entries are removed.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    // == Contains Key ==
    /// Checks for an unexpired entry without changing its recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains_key(key)
    }

    // == Remove ==
    /// Removes an entry. Absent keys are ignored.
    pub fn remove<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key);
    }

    // == Clear ==
    /// Removes every entry. Capacity is unchanged.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    // == Capacity ==
    /// Returns the configured capacity.
    pub fn cap(&self) -> usize {
        self.inner.lock().capacity()
    }

    // == Set Capacity ==
    /// Changes the capacity, immediately evicting least recently used entries
    /// that no longer fit. Returns how many were evicted.
    pub fn set_capacity(&self, capacity: usize) -> usize {
        self.inner.lock().set_capacity(capacity)
    }

    // == Keys ==
    /// Snapshot of the keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys()
    }

    // == Length ==
    /// Returns the number of entries, including expired ones not yet accessed.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.inner.lock();
        f.debug_struct("LruCache")
            .field("capacity", &store.capacity())
            .field("len", &store.len())
            .finish()
    }
}
