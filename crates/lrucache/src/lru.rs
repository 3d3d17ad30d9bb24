//! LRU (Least Recently Used) index and recency ordering
//!
//! Entries live in an arena and link to each other by slot index, so
//! promotion and eviction are O(1) and no entry is owned by its neighbours.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::error::{Error, Result};

/// Slot in the recency list
struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Single-owner LRU cache with fixed capacity
///
/// `head` is the most recently used entry and `tail` the least recently
/// used one. Both are `None` exactly when the cache is empty.
pub struct LruCache<K, V> {
    index: HashMap<K, usize, RandomState>,
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty cache holding at most `capacity` entries
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidConfiguration(
                "capacity must be at least 1".into(),
            ));
        }

        // One spare slot: a new entry is linked before the tail is evicted.
        Ok(Self {
            index: HashMap::with_capacity_and_hasher(capacity + 1, RandomState::new()),
            slots: Vec::with_capacity(capacity + 1),
            free: Vec::new(),
            head: None,
            tail: None,
            capacity,
        })
    }

    /// Get a value and mark it as most recently used
    ///
    /// A miss leaves the cache untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.promote(idx);
        self.slots[idx].as_ref().map(|entry| &entry.value)
    }

    /// Get a value without touching its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.slots[idx].as_ref().map(|entry| &entry.value)
    }

    /// Insert or replace a value and mark it as most recently used
    ///
    /// Returns the entry evicted to make room, if the insert of a new key
    /// pushed the cache over capacity. Replacing an existing key never evicts.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.index.get(&key) {
            if let Some(entry) = self.slots[idx].as_mut() {
                entry.value = value;
            }
            self.promote(idx);
            return None;
        }

        let idx = self.alloc(Entry {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.attach_front(idx);
        self.index.insert(key, idx);

        if self.index.len() > self.capacity {
            self.pop_lru()
        } else {
            None
        }
    }

    /// Remove a key, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.index.remove(key)?;
        self.detach(idx);
        self.release(idx).map(|entry| entry.value)
    }

    /// Remove and return the least recently used entry
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        self.detach(idx);
        let entry = self.release(idx)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Check whether a key is resident (does not touch recency)
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Number of resident entries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of resident entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            slots: &self.slots,
            cursor: self.head,
            remaining: self.index.len(),
        }
    }

    /// Walk the ordering and cross-check it against the index
    ///
    /// Returns a description of the first broken invariant.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        if self.index.len() > self.capacity {
            return Err(format!(
                "{} entries exceed capacity {}",
                self.index.len(),
                self.capacity
            ));
        }

        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            if count >= self.index.len() {
                return Err("ordering is longer than the index (cycle?)".into());
            }
            let entry = self
                .slots
                .get(idx)
                .and_then(Option::as_ref)
                .ok_or_else(|| format!("slot {} is linked but empty", idx))?;
            if entry.prev != prev {
                return Err(format!(
                    "slot {} links back to {:?}, expected {:?}",
                    idx, entry.prev, prev
                ));
            }
            if self.index.get(&entry.key) != Some(&idx) {
                return Err(format!("slot {} is not indexed under its key", idx));
            }
            count += 1;
            prev = Some(idx);
            cursor = entry.next;
        }

        if self.tail != prev {
            return Err(format!(
                "tail is {:?} but the ordering ends at {:?}",
                self.tail, prev
            ));
        }
        if count != self.index.len() {
            return Err(format!(
                "ordering holds {} entries, index holds {}",
                count,
                self.index.len()
            ));
        }
        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        if occupied != count {
            return Err(format!(
                "{} occupied slots but {} reachable entries (off by {})",
                occupied,
                count,
                occupied.abs_diff(count)
            ));
        }
        Ok(())
    }

    fn promote(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.detach(idx);
        self.attach_front(idx);
    }

    /// Unlink a slot, joining its neighbours (or emptying the list)
    fn detach(&mut self, idx: usize) {
        let (prev, next) = match self.slots[idx].as_mut() {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_entry) = self.slots[prev_idx].as_mut() {
                    prev_entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_entry) = self.slots[next_idx].as_mut() {
                    next_entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(entry) = self.slots[idx].as_mut() {
            entry.prev = None;
            entry.next = old_head;
        }

        match old_head {
            Some(head_idx) => {
                if let Some(head) = self.slots[head_idx].as_mut() {
                    head.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
    }

    fn alloc(&mut self, entry: Entry<K, V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                idx
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, idx: usize) -> Option<Entry<K, V>> {
        let entry = self.slots[idx].take();
        if entry.is_some() {
            self.free.push(idx);
        }
        entry
    }
}

/// Iterator over keys in recency order, created by [`LruCache::keys`]
pub struct Keys<'a, K, V> {
    slots: &'a [Option<Entry<K, V>>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.slots.get(self.cursor?)?.as_ref()?;
        self.cursor = entry.next;
        self.remaining -= 1;
        Some(&entry.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
