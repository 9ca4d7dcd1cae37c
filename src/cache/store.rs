//! Cache Store Module
//!
//! Main cache engine combining HashMap lookup with LRU ordering and lazy TTL
//! expiration. The store is not synchronized; [`crate::cache::LruCache`] wraps
//! it in a lock.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{CacheEntry, LruList, Slot};

// == Cache Store ==
/// Bounded key/value storage with LRU eviction and TTL support.
///
/// `index` and `order` always hold the same keys; every method updates both
/// before returning.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to list slot
    index: HashMap<K, Slot>,
    /// Entries from most to least recently used
    order: LruList<CacheEntry<K, V>>,
    /// Maximum number of live entries
    capacity: usize,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// A capacity of 0 is accepted; every insertion then evicts itself.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::new(),
            order: LruList::new(),
            capacity,
        }
    }

    // == Add ==
    /// Stores a key-value pair that never expires.
    pub fn add(&mut self, key: K, value: V) {
        self.add_with_ttl(key, value, Duration::ZERO);
    }

    // == Add With TTL ==
    /// Stores a key-value pair that expires after `ttl` (zero = never).
    ///
    /// If the key already exists, the value and TTL are replaced and the entry
    /// becomes most recently used. Otherwise the entry is inserted at the front
    /// and, if that overflows capacity, the least recently used entry is evicted.
    pub fn add_with_ttl(&mut self, key: K, value: V, ttl: Duration) {
        self.insert_at(key, value, ttl, Instant::now());
    }

    pub(crate) fn insert_at(&mut self, key: K, value: V, ttl: Duration, now: Instant) {
        if let Some(&slot) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(slot) {
                entry.refresh(value, ttl, now);
            }
            self.order.move_to_front(slot);
            trace!(?ttl, "Cache entry updated");
            return;
        }

        let slot = self.order.push_front(CacheEntry::new(key.clone(), value, ttl, now));
        self.index.insert(key, slot);
        trace!(?ttl, len = self.order.len(), "Cache entry inserted");

        if self.order.len() > self.capacity {
            self.evict_lru();
        }
    }

    // == Get ==
    /// Retrieves a value by key, marking it most recently used.
    ///
    /// An expired entry is removed and reported as absent.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_at(key, Instant::now())
    }

    pub(crate) fn get_at<Q>(&mut self, key: &Q, now: Instant) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;

        let expired = match self.order.get(slot) {
            Some(entry) => entry.is_expired_at(now),
            None => true,
        };
        if expired {
            self.index.remove(key);
            self.order.remove(slot);
            debug!(len = self.order.len(), "Expired cache entry removed on access");
            return None;
        }

        self.order.move_to_front(slot);
        self.order.get(slot).map(|entry| &entry.value)
    }

    // == Contains Key ==
    /// Checks for a live, unexpired entry without touching recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        self.index
            .get(key)
            .and_then(|&slot| self.order.get(slot))
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    // == Remove ==
    /// Removes an entry by key, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.index.remove(key)?;
        self.order.remove(slot).map(|entry| entry.value)
    }

    // == Clear ==
    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        let dropped = self.order.len();
        self.index = HashMap::new();
        self.order.clear();
        debug!(dropped, "Cache cleared");
    }

    // == Capacity ==
    /// Returns the maximum number of live entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Set Capacity ==
    /// Changes the capacity, evicting least recently used entries until the
    /// store fits. Returns the number of evicted entries.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity;

        let mut evicted = 0;
        while self.order.len() > self.capacity {
            if self.evict_lru().is_none() {
                break;
            }
            evicted += 1;
        }

        debug!(capacity, evicted, "Cache capacity changed");
        evicted
    }

    // == Evict LRU ==
    /// Removes the least recently used entry from both structures.
    pub(crate) fn evict_lru(&mut self) -> Option<CacheEntry<K, V>> {
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        debug!(
            len = self.order.len(),
            capacity = self.capacity,
            "Least recently used entry evicted"
        );
        Some(entry)
    }

    // == Keys ==
    /// Returns the keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.order.iter().map(|entry| entry.key.clone()).collect()
    }

    // == Length ==
    /// Returns the number of entries, including expired ones not yet accessed.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.order.len(), "index/order size drift");
        for entry in self.order.iter() {
            let slot = self.index.get(&entry.key).expect("key missing from index");
            let indexed = self.order.get(*slot).expect("index points at empty slot");
            assert!(indexed.key == entry.key, "index points at wrong entry");
        }
    }
}
