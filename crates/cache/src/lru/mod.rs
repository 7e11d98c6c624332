//! Strict LRU cache backed by an index-linked arena
//!
//! Entries live in a `Vec` of slots chained into a doubly-linked recency list.
//! Slots 0 and 1 are sentinels for the hot (most recently used) and cold
//! (least recently used) ends, so promotion, insertion and eviction are a
//! handful of index splices. A `HashMap` maps each key to its slot; both views
//! are updated together by every mutating call.

use envdoctor_core::{Error, Result};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

const HEAD: usize = 0;
const TAIL: usize = 1;

#[derive(Debug)]
struct Slot<K, V> {
    /// `None` for the sentinels and for slots on the free list
    entry: Option<(K, V)>,
    prev: usize,
    next: usize,
}

impl<K, V> Slot<K, V> {
    fn sentinel(prev: usize, next: usize) -> Self {
        Self {
            entry: None,
            prev,
            next,
        }
    }
}

/// Fixed-capacity key/value store with least-recently-used eviction
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    index: HashMap<K, usize>,
    slots: Vec<Slot<K, V>>,
    free: Vec<usize>,
    capacity: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is rejected rather than clamped.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid_capacity(capacity));
        }

        Ok(Self {
            index: HashMap::with_capacity(capacity),
            slots: Self::sentinels(capacity),
            free: Vec::new(),
            capacity,
        })
    }

    fn sentinels(capacity: usize) -> Vec<Slot<K, V>> {
        let mut slots = Vec::with_capacity(capacity + 2);
        slots.push(Slot::sentinel(HEAD, TAIL));
        slots.push(Slot::sentinel(HEAD, TAIL));
        slots
    }

    /// Look up a key, marking it most recently used on a hit
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.promote(idx);
        self.slots[idx].entry.as_ref().map(|(_, v)| v)
    }

    /// Look up a key without touching its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.slots[idx].entry.as_ref().map(|(_, v)| v)
    }

    /// Insert or replace a value; the key becomes most recently used.
    ///
    /// Replacing an existing key never evicts. Inserting a new key into a full
    /// cache evicts exactly one entry, the least recently used, and returns it.
    pub fn set(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.index.get(&key) {
            if let Some((_, slot_value)) = self.slots[idx].entry.as_mut() {
                *slot_value = value;
            }
            self.promote(idx);
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.evict_lru()
        } else {
            None
        };

        let idx = self.allocate(key.clone(), value);
        self.push_front(idx);
        self.index.insert(key, idx);
        evicted
    }

    /// Whether the key is present. Does not affect recency.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Remove a key, returning whether it was present
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.remove(key) {
            Some(idx) => {
                self.unlink(idx);
                self.release(idx);
                true
            }
            None => false,
        }
    }

    /// Drop every entry and reset the recency order
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.truncate(2);
        self.slots[HEAD] = Slot::sentinel(HEAD, TAIL);
        self.slots[TAIL] = Slot::sentinel(HEAD, TAIL);
        self.free.clear();
    }

    pub fn size(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys from most to least recently used. O(n); meant for diagnostics.
    pub fn keys_by_recency(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.index.len());
        let mut idx = self.slots[HEAD].next;
        while idx != TAIL {
            if let Some((key, _)) = self.slots[idx].entry.as_ref() {
                keys.push(key);
            }
            idx = self.slots[idx].next;
        }
        keys
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let idx = self.slots[TAIL].prev;
        if idx == HEAD {
            return None;
        }

        self.unlink(idx);
        let (key, value) = self.slots[idx].entry.take()?;
        self.index.remove(&key);
        self.free.push(idx);
        Some((key, value))
    }

    fn allocate(&mut self, key: K, value: V) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx].entry = Some((key, value));
                idx
            }
            None => {
                self.slots.push(Slot {
                    entry: Some((key, value)),
                    prev: HEAD,
                    next: TAIL,
                });
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, idx: usize) {
        self.slots[idx].entry = None;
        self.free.push(idx);
    }

    fn promote(&mut self, idx: usize) {
        if self.slots[HEAD].next == idx {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
    }

    fn push_front(&mut self, idx: usize) {
        let first = self.slots[HEAD].next;
        self.slots[idx].prev = HEAD;
        self.slots[idx].next = first;
        self.slots[first].prev = idx;
        self.slots[HEAD].next = idx;
    }
}

#[cfg(test)]
mod tests;
