//! Item Pool Module
//!
//! Bounded free-list of cleared item slots, reused by later writes.

use tracing::trace;

use crate::cache::item::Item;

// == Item Pool ==
/// Fixed-capacity stack of recycled item slots.
///
/// Both operations are non-blocking: pushing into a full pool drops the slot,
/// popping from an empty pool returns `None`. The pool is not synchronized on
/// its own; the cache keeps it under the same lock as its entry map.
#[derive(Debug)]
pub(crate) struct ItemPool<V> {
    /// Recycled slots, all cleared
    slots: Vec<Box<Item<V>>>,
    /// Maximum number of slots retained
    capacity: usize,
}

impl<V> ItemPool<V> {
    // == Constructor ==
    /// Creates an empty pool that retains at most `capacity` slots.
    ///
    /// Storage grows as slots are recycled, so any capacity is accepted.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
        }
    }

    // == Try Push ==
    /// Clears `item` and keeps it for reuse.
    ///
    /// Returns false, dropping the slot, when the pool is already full.
    pub fn try_push(&mut self, mut item: Box<Item<V>>) -> bool {
        item.reset();
        if self.is_full() {
            trace!(capacity = self.capacity, "item pool full, dropping slot");
            return false;
        }
        self.slots.push(item);
        true
    }

    // == Try Pop ==
    /// Takes a recycled slot, if any is available.
    pub fn try_pop(&mut self) -> Option<Box<Item<V>>> {
        self.slots.pop()
    }

    // == Length ==
    /// Returns the number of slots currently held.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    // == Capacity ==
    /// Returns the maximum number of slots the pool retains.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Is Full ==
    /// Returns true if the next push would drop its slot.
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }
}
