//! Cache: thread-safe handle over an LRU cache

use std::borrow::Borrow;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::config::CacheConfig;
use crate::error::Result;
use crate::lru::LruCache;
use crate::stats::{CacheStats, StatsSnapshot};

/// Bounded LRU cache safe to share between threads
///
/// One mutex guards the index and the recency ordering together, held for
/// the whole of each call, so no caller ever sees one updated without the
/// other. Values are cloned out on `get`; store an `Arc` for large values.
pub struct Cache<K, V> {
    /// Index + recency ordering
    inner: Mutex<LruCache<K, V>>,

    /// Cache statistics
    stats: CacheStats,

    /// Cache capacity
    capacity: usize,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty cache holding at most `capacity` entries
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of resident entries, at least 1
    ///
    /// # Returns
    /// * `Result<Cache>` - `Error::InvalidConfiguration` if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        let lru = LruCache::new(capacity).map_err(|err| {
            warn!(capacity, "rejected cache configuration");
            err
        })?;

        Ok(Self {
            inner: Mutex::new(lru),
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Create a cache from validated settings
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity)
    }

    /// Get a value and mark it as most recently used
    ///
    /// # Returns
    /// * `Option<V>` - a clone of the cached value, `None` on a miss
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let value = self.inner.lock().get(key).cloned();

        if value.is_some() {
            self.stats.record_hit();
            trace!("cache hit");
        } else {
            self.stats.record_miss();
            trace!("cache miss");
        }
        value
    }

    /// Insert or replace a value and mark it as most recently used
    ///
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry. The evicted value is dropped after the lock is released.
    pub fn set(&self, key: K, value: V) {
        let (replaced, evicted) = {
            let mut lru = self.inner.lock();
            let replaced = lru.contains(&key);
            (replaced, lru.put(key, value))
        };

        self.record_write(replaced, evicted.is_some());
    }

    /// Insert a value if the key is absent, or replace the resident value
    /// if `replace` accepts it, as one atomic step
    ///
    /// Returns `false` (leaving the cache untouched) when `replace` rejects
    /// the resident value. `replace` runs under the lock and must not touch
    /// this cache.
    pub fn set_if<F>(&self, key: K, value: V, replace: F) -> bool
    where
        F: FnOnce(&V) -> bool,
    {
        let (replaced, evicted) = {
            let mut lru = self.inner.lock();
            let replaced = match lru.peek(&key) {
                Some(current) if !replace(current) => return false,
                Some(_) => true,
                None => false,
            };
            (replaced, lru.put(key, value))
        };

        self.record_write(replaced, evicted.is_some());
        true
    }

    /// Get a value, or build and insert it on a miss, as one atomic step
    ///
    /// `make` runs under the lock and must not touch this cache.
    pub fn get_or_insert_with<F>(&self, key: K, make: F) -> V
    where
        F: FnOnce() -> V,
        V: Clone,
    {
        let mut lru = self.inner.lock();
        if let Some(value) = lru.get(&key) {
            let value = value.clone();
            drop(lru);
            self.stats.record_hit();
            return value;
        }

        let value = make();
        let evicted = lru.put(key, value.clone());
        drop(lru);

        self.stats.record_miss();
        self.record_write(false, evicted.is_some());
        value
    }

    /// Remove a key, returning its value
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.inner.lock().remove(key);
        if value.is_some() {
            self.stats.record_removal();
        }
        value
    }

    /// Check whether a key is resident (does not touch recency)
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    /// Keys from most to least recently used, as of one instant
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys().cloned().collect()
    }

    /// Get current number of resident entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry and reset statistics
    pub fn clear(&self) {
        self.inner.lock().clear();
        self.stats.reset();
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Copy the current statistics
    pub fn stats_snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Validate the internal structure under the lock
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        self.inner.lock().check_invariants()
    }

    fn record_write(&self, replaced: bool, evicted: bool) {
        if replaced {
            self.stats.record_update();
        } else {
            self.stats.record_insert();
        }

        if evicted {
            self.stats.record_eviction();
            debug!(capacity = self.capacity, "evicted least recently used entry");
        }
    }
}
