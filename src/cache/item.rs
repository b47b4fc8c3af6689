//! Cache Item Module
//!
//! Defines the recyclable slot that holds one cached value and its expiration.

use std::time::{Duration, Instant};

// == Item ==
/// A single cache slot with a value and an optional absolute expiration.
///
/// Slots are owned by the cache and handed back to the pool when their entry
/// is deleted or lazily expired. A recycled slot holds no value.
#[derive(Debug)]
pub(crate) struct Item<V> {
    /// The stored value, `None` only while the slot sits in the pool
    pub value: Option<V>,
    /// Expiration instant, None = never expires
    pub expires_at: Option<Instant>,
}

impl<V> Item<V> {
    // == Constructor ==
    /// Creates an empty slot.
    pub fn empty() -> Self {
        Self {
            value: None,
            expires_at: None,
        }
    }

    // == Fill ==
    /// Stores `value` in the slot, expiring after `ttl` if one is given.
    ///
    /// A TTL too large to represent as an instant is treated as no expiration.
    pub fn fill(&mut self, value: V, ttl: Option<Duration>) {
        self.value = Some(value);
        self.expires_at = ttl.and_then(|ttl| Instant::now().checked_add(ttl));
    }

    // == Reset ==
    /// Clears the value and expiration so the slot retains nothing.
    pub fn reset(&mut self) {
        self.value = None;
        self.expires_at = None;
    }

    // == Is Expired ==
    /// Checks if the item has expired.
    ///
    /// An item whose expiration equals the current instant is expired, so a
    /// zero TTL always yields an already-expired item.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if no expiration is set.
    ///
    /// Saturates to zero once the item has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
