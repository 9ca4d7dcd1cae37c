//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction and lazy TTL expiration.

mod entry;
mod lru;
mod shared;
mod store;
mod traits;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::{Iter, LruList, Slot};
pub use shared::LruCache;
pub use store::CacheStore;
pub use traits::Cache;
