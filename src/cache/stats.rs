//! Cache Statistics Module
//!
//! Tracks lookup outcomes and item recycling.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Stats Recorder ==
/// Lock-free counters updated by cache operations.
///
/// Counters are atomics so lookups can record hits while holding only the
/// shared lock.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
    recycled: AtomicU64,
    allocations: AtomicU64,
}

impl StatsRecorder {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts an entry removed because a lookup found it expired.
    pub fn record_expiration(&self) {
        self.expirations.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a write served by a slot taken from the pool.
    pub fn record_recycled(&self) {
        self.recycled.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a write that had to allocate a fresh slot.
    pub fn record_allocation(&self) {
        self.allocations.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the counters into a [`CacheStats`] with the given gauges.
    pub fn snapshot(&self, total_entries: usize, pool_size: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            recycled: self.recycled.load(Ordering::Relaxed),
            allocations: self.allocations.load(Ordering::Relaxed),
            total_entries,
            pool_size,
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of cache activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of failed lookups (key not found or expired)
    pub misses: u64,
    /// Number of entries evicted lazily because a lookup found them expired
    pub expirations: u64,
    /// Number of writes that reused a slot from the pool
    pub recycled: u64,
    /// Number of writes that allocated a fresh slot
    pub allocations: u64,
    /// Entries in the map, including expired ones not yet evicted
    pub total_entries: usize,
    /// Slots currently held by the pool
    pub pool_size: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
