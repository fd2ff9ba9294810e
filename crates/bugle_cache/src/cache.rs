//! Bounded TTL cache implementation.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cache entry with value and expiration.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

#[derive(Debug)]
struct Inner<V> {
    entries: HashMap<u64, CacheEntry<V>>,
    access_order: Vec<u64>,
}

impl<V> Inner<V> {
    fn touch(&mut self, key: u64) {
        if let Some(pos) = self.access_order.iter().position(|k| *k == key) {
            self.access_order.remove(pos);
        }
        self.access_order.push(key);
    }

    fn forget(&mut self, key: u64) {
        self.entries.remove(&key);
        if let Some(pos) = self.access_order.iter().position(|k| *k == key) {
            self.access_order.remove(pos);
        }
    }

    fn evict_lru(&mut self) {
        if let Some(key) = self.access_order.first().copied() {
            tracing::debug!(key, "Evicting LRU cache entry");
            self.entries.remove(&key);
            self.access_order.remove(0);
        }
    }
}

/// Bounded cache with per-entry TTL and LRU eviction.
///
/// Keys are fingerprints computed by the caller. All operations take
/// `&self` and are safe to call from concurrent tasks.
///
/// # Examples
///
/// ```
/// use bugle_cache::TtlCache;
/// use std::time::Duration;
///
/// let cache = TtlCache::new(16);
/// cache.insert(1, "on duty: alice".to_string(), Duration::from_secs(60));
///
/// assert_eq!(cache.get(1), Some("on duty: alice".to_string()));
/// assert_eq!(cache.get(2), None);
/// ```
pub struct TtlCache<V> {
    max_entries: usize,
    inner: Mutex<Inner<V>>,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache holding at most `max_entries` live entries.
    pub fn new(max_entries: usize) -> Self {
        tracing::debug!(max_entries, "Creating new TtlCache");
        Self {
            max_entries,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                access_order: Vec::new(),
            }),
        }
    }

    /// Get a cached value.
    ///
    /// Returns None if the entry doesn't exist or has expired. An expired
    /// entry is removed. A live hit refreshes the entry's recency.
    pub fn get(&self, key: u64) -> Option<V> {
        let mut inner = self.inner.lock();

        let entry = inner.entries.get(&key)?;
        if entry.is_expired() {
            tracing::debug!(key, "Cache entry expired, removing");
            inner.forget(key);
            return None;
        }

        let value = entry.value.clone();
        inner.touch(key);
        tracing::debug!(key, "Cache hit");
        Some(value)
    }

    /// Insert a value under `key` with the given time to live.
    ///
    /// When the cache is full and `key` is new, the least recently used
    /// entry is evicted first.
    pub fn insert(&self, key: u64, value: V, ttl: Duration) {
        let mut inner = self.inner.lock();

        if inner.entries.len() >= self.max_entries && !inner.entries.contains_key(&key) {
            inner.evict_lru();
        }

        inner.touch(key);
        inner.entries.insert(
            key,
            CacheEntry {
                value,
                created_at: Instant::now(),
                ttl,
            },
        );
        tracing::debug!(key, ttl = ?ttl, size = inner.entries.len(), "Inserted cache entry");
    }

    /// Number of stored entries, counting any not yet removed expired ones.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Check whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }
}
