//! SharedLru: thread-safe handle over an LRU cache

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use lrukit::{LruCache, Result};
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::stats::CacheStats;

const UNNAMED: &str = "lru";

/// Cloneable, lock-guarded LRU cache with hit/miss statistics
///
/// Clones share the same entries and counters. Operations that touch
/// recency (`get`, `put`, `get_or_insert_with`) take the write lock;
/// pure lookups take the read lock.
pub struct SharedLru<K, V> {
    /// The cache itself, behind a single lock
    cache: Arc<RwLock<LruCache<K, V>>>,

    /// Cache statistics
    stats: Arc<CacheStats>,

    /// Label for log events
    name: Arc<str>,

    /// Cache capacity
    capacity: usize,
}

impl<K, V> Clone for SharedLru<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            stats: Arc::clone(&self.stats),
            name: Arc::clone(&self.name),
            capacity: self.capacity,
        }
    }
}

impl<K, V> SharedLru<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new shared cache with the given capacity
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - if `capacity` is less than 2
    pub fn new(capacity: usize) -> Result<Self> {
        Self::from_config(&CacheConfig::with_capacity(capacity))
    }

    /// Create a new shared cache from a config
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - if `config.capacity` is less than 2
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let cache = LruCache::new(config.capacity)?;
        let name: Arc<str> = Arc::from(config.name.as_deref().unwrap_or(UNNAMED));

        debug!(cache = %name, capacity = config.capacity, "created shared cache");

        Ok(Self {
            cache: Arc::new(RwLock::new(cache)),
            stats: Arc::new(CacheStats::new()),
            name,
            capacity: config.capacity,
        })
    }

    /// Get a copy of a value and mark it most recently used
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let value = self.cache.write().get(key).cloned();

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }

        value
    }

    /// Get a copy of a value without touching recency or statistics
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.cache.read().peek(key).cloned()
    }

    /// Insert a value as the most recently used entry
    pub fn put(&self, key: K, value: V) {
        let evicted = {
            let mut cache = self.cache.write();
            let evicts = cache.len() == cache.capacity() && !cache.contains_key(&key);
            cache.put(key, value);
            evicts
        };

        self.stats.record_insert();
        if evicted {
            self.stats.record_eviction();
            trace!(cache = %self.name, "evicted least recently used entry");
        }
    }

    /// Return the cached value for `key`, computing and caching it on a miss
    ///
    /// `compute` runs without the lock held, so two threads missing on the
    /// same key may both compute; the later `put` wins.
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
        V: Clone,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }

        let value = compute();
        self.put(key, value.clone());
        value
    }

    /// Remove a key, returning its value
    ///
    /// # Errors
    /// * `Error::KeyNotFound` - if `key` is not cached
    pub fn remove<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.write().remove(key)
    }

    /// Check whether `key` is cached, without touching recency
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.read().contains_key(key)
    }

    /// Check whether any entry holds `value`, without touching recency
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.cache.read().contains(value)
    }

    /// Snapshot of the keys, least to most recently used
    pub fn keys(&self) -> Vec<K> {
        self.cache.read().keys().cloned().collect()
    }

    /// Snapshot of the values, least to most recently used
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.cache.read().values().cloned().collect()
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Clear the cache and reset statistics
    pub fn clear(&self) {
        self.cache.write().clear();
        self.stats.reset();
        debug!(cache = %self.name, "cleared shared cache");
    }
}
