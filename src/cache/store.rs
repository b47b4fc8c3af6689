//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with lazy TTL expiration and
//! item slot recycling.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::cache::item::Item;
use crate::cache::pool::ItemPool;
use crate::cache::stats::{CacheStats, StatsRecorder};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

/// State guarded by the cache lock.
struct Inner<K, V> {
    items: HashMap<K, Box<Item<V>>>,
    pool: ItemPool<V>,
}

// == Cache ==
/// Thread-safe key-value cache with optional per-entry TTL.
///
/// Expiration is lazy: an expired entry is only removed when a lookup touches
/// it, when it is deleted, or when the cache is cleared. Entries written with
/// a zero TTL and never read again stay in the map until [`Cache::clear`].
///
/// Slots of deleted and lazily expired entries are kept in a bounded pool and
/// reused by later writes. Overwriting a key does not recycle the old slot.
///
/// Share a cache between threads by wrapping it in an `Arc`.
pub struct Cache<K, V> {
    config: CacheConfig,
    inner: RwLock<Inner<K, V>>,
    stats: StatsRecorder,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates an empty cache with the given configuration.
    ///
    /// # Arguments
    /// * `config` - Cache settings; `max_pool_size` may be any value
    pub fn with_config(config: CacheConfig) -> Self {
        debug!(max_pool_size = config.max_pool_size, "cache created");
        Self {
            config,
            inner: RwLock::new(Inner {
                items: HashMap::new(),
                pool: ItemPool::new(config.max_pool_size),
            }),
            stats: StatsRecorder::default(),
        }
    }

    /// Returns the configuration the cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// Returns [`CacheError::NotFound`] if the key is absent or its entry has
    /// expired. An expired entry is removed and its slot returned to the pool.
    ///
    /// # Arguments
    /// * `key` - The key to retrieve, in any borrowed form of `K`
    pub fn get<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let expired = {
            let inner = self.inner.read();
            match inner.items.get(key) {
                Some(item) if !item.is_expired() => {
                    if let Some(value) = &item.value {
                        self.stats.record_hit();
                        return Ok(value.clone());
                    }
                    false
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.evict_expired(key);
        }
        self.stats.record_miss();
        Err(CacheError::NotFound)
    }

    // == TTL ==
    /// Returns the remaining lifetime of the entry under `key`.
    ///
    /// `Ok(None)` means the entry never expires. Expired entries behave as in
    /// [`Cache::get`].
    ///
    /// # Arguments
    /// * `key` - The key to inspect
    pub fn ttl<Q>(&self, key: &Q) -> Result<Option<Duration>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let expired = {
            let inner = self.inner.read();
            match inner.items.get(key) {
                Some(item) if !item.is_expired() => return Ok(item.ttl_remaining()),
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.evict_expired(key);
        }
        Err(CacheError::NotFound)
    }

    /// Removes `key` under the exclusive lock if its entry is still expired.
    ///
    /// The entry may have been replaced or deleted between releasing the
    /// shared lock and acquiring this one.
    fn evict_expired<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.write();
        if !inner.items.get(key).is_some_and(|item| item.is_expired()) {
            return;
        }
        if let Some(item) = inner.items.remove(key) {
            inner.pool.try_push(item);
            self.stats.record_expiration();
            trace!("evicted expired entry");
        }
    }

    // == Set ==
    /// Stores `value` under `key` with no expiration.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    pub fn set(&self, key: K, value: V) {
        self.insert(key, value, None);
    }

    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// A zero TTL stores an entry that is already expired.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Lifetime of the entry, measured from now
    pub fn set_with_expiration(&self, key: K, value: V, ttl: Duration) {
        self.insert(key, value, Some(ttl));
    }

    fn insert(&self, key: K, value: V, ttl: Option<Duration>) {
        let mut inner = self.inner.write();

        let mut item = match inner.pool.try_pop() {
            Some(item) => {
                self.stats.record_recycled();
                item
            }
            None => {
                self.stats.record_allocation();
                Box::new(Item::empty())
            }
        };
        item.fill(value, ttl);

        inner.items.insert(key, item);
    }

    // == Get Or Set ==
    /// Returns the cached value for `key`, or stores and returns the value
    /// produced by `factory`.
    ///
    /// Not atomic: concurrent callers that both miss each run their factory,
    /// and the last write wins.
    ///
    /// # Arguments
    /// * `key` - The key to look up or store
    /// * `factory` - Produces the value on a miss; not called on a hit
    pub fn get_or_set<F>(&self, key: K, factory: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.get_or_insert_with(key, factory, None)
    }

    /// Like [`Cache::get_or_set`], storing a miss with the given TTL.
    ///
    /// # Arguments
    /// * `key` - The key to look up or store
    /// * `factory` - Produces the value on a miss; not called on a hit
    /// * `ttl` - Lifetime of a newly stored entry, measured from now
    pub fn get_or_set_with_expiration<F>(&self, key: K, factory: F, ttl: Duration) -> V
    where
        F: FnOnce() -> V,
    {
        self.get_or_insert_with(key, factory, Some(ttl))
    }

    fn get_or_insert_with<F>(&self, key: K, factory: F, ttl: Option<Duration>) -> V
    where
        F: FnOnce() -> V,
    {
        if let Ok(value) = self.get(&key) {
            return value;
        }
        let value = factory();
        self.insert(key, value.clone(), ttl);
        value
    }

    // == Exists ==
    /// Reports whether `key` is in the map.
    ///
    /// Expiration is not checked: an expired entry that no lookup has evicted
    /// yet still exists.
    ///
    /// # Arguments
    /// * `key` - The key to check
    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().items.contains_key(key)
    }

    // == Delete ==
    /// Removes `key` and recycles its slot. Absent keys are ignored.
    ///
    /// # Arguments
    /// * `key` - The key to delete
    pub fn delete<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.write();
        if let Some(item) = inner.items.remove(key) {
            inner.pool.try_push(item);
        }
    }

    // == Clear ==
    /// Removes every entry.
    ///
    /// Slots are recycled until the pool is full; the rest are dropped.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        let Inner { items, pool } = &mut *inner;

        let removed = std::mem::take(items);
        let total = removed.len();
        let mut recycled = 0;
        for (_, item) in removed {
            if !pool.try_push(item) {
                break;
            }
            recycled += 1;
        }

        debug!(total, recycled, "cache cleared");
    }

    // == Size ==
    /// Returns the number of entries, including expired ones not yet evicted.
    pub fn size(&self) -> usize {
        self.inner.read().items.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().items.is_empty()
    }

    /// Returns the number of slots waiting in the pool.
    pub fn pool_size(&self) -> usize {
        self.inner.read().pool.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.read();
        self.stats.snapshot(inner.items.len(), inner.pool.len())
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Cache")
            .field("size", &inner.items.len())
            .field("pool_size", &inner.pool.len())
            .field("max_pool_size", &inner.pool.capacity())
            .finish()
    }
}
