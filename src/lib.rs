//! LRU TTL Cache - A bounded, thread-safe in-process cache
//!
//! Least-recently-used eviction on overflow, per-entry TTL checked lazily on access.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Cache, LruCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
