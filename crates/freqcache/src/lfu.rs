//! LFU (Least Frequently Used) cache implementation
//!
//! Every live entry sits in exactly one frequency bucket: an intrusive
//! recency list holding all entries touched that many times. Buckets are
//! dropped as soon as they empty. `min_freq` names the bucket whose tail is
//! the next eviction victim.
//!
//! Frequencies only ever grow by one per touch, so when the bucket at
//! `min_freq` empties during a touch the entry lands at `min_freq + 1`,
//! which becomes the new minimum. A fresh insert always resets the
//! minimum to 1.

use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::list::{Linked, Links, List};
use crate::policy::{Cache, Policy};
use crate::slab::Slab;

struct Entry<K, V> {
    key: K,
    value: V,
    freq: u64,
    links: Links,
}

impl<K, V> Linked for Entry<K, V> {
    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

/// LFU cache with fixed capacity
///
/// Evicts the least frequently used key, breaking ties by evicting the
/// least recently used one among them. Both `get` and overwriting `put`
/// count as one use.
pub struct LfuCache<K, V> {
    index: HashMap<K, usize, RandomState>,
    entries: Slab<Entry<K, V>>,
    buckets: HashMap<u64, List, RandomState>,
    min_freq: u64,
    capacity: usize,
}

impl<K, V> LfuCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LFU cache with the given capacity
    ///
    /// # Returns
    /// * `Err(Error::ZeroCapacity)` if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        debug!(capacity, "created lfu cache");

        Ok(Self::with_capacity(capacity))
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            entries: Slab::with_capacity(capacity),
            buckets: HashMap::with_hasher(RandomState::new()),
            min_freq: 0,
            capacity,
        }
    }

    /// Get a copy of the value for `key`, counting one use
    pub fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let idx = *self.index.get(key)?;
        self.bump(idx);
        self.entries.get(idx).map(|entry| entry.value.clone())
    }

    /// Insert a key-value pair
    ///
    /// Overwriting an existing key replaces its value and counts one use.
    /// A new key enters at frequency 1, evicting first when the cache is
    /// full. Returns the evicted entry, if any.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.index.get(&key) {
            if let Some(entry) = self.entries.get_mut(idx) {
                entry.value = value;
            }
            self.bump(idx);
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        let idx = self.entries.insert(Entry {
            key: key.clone(),
            value,
            freq: 1,
            links: Links::default(),
        });
        self.buckets
            .entry(1)
            .or_default()
            .push_front(&mut self.entries, idx);
        self.index.insert(key, idx);
        self.min_freq = 1;
        debug_assert_eq!(self.entries.len(), self.index.len());

        evicted
    }

    /// Number of uses recorded for `key` since it entered the cache
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let idx = *self.index.get(key)?;
        self.entries.get(idx).map(|entry| entry.freq)
    }

    /// Lowest frequency among live entries, `None` when empty
    pub fn min_freq(&self) -> Option<u64> {
        if self.index.is_empty() {
            None
        } else {
            Some(self.min_freq)
        }
    }

    /// Check if `key` is cached without counting a use
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    /// Move the entry at `idx` from its bucket to the head of the next one
    fn bump(&mut self, idx: usize) {
        let Some(freq) = self.entries.get(idx).map(|entry| entry.freq) else {
            return;
        };

        // Saturated counter: only refresh recency.
        if freq == u64::MAX {
            if let Some(bucket) = self.buckets.get_mut(&freq) {
                bucket.move_to_front(&mut self.entries, idx);
            }
            return;
        }

        if let Some(bucket) = self.buckets.get_mut(&freq) {
            bucket.unlink(&mut self.entries, idx);
            if bucket.is_empty() {
                self.buckets.remove(&freq);
                if self.min_freq == freq {
                    self.min_freq += 1;
                }
            }
        }

        if let Some(entry) = self.entries.get_mut(idx) {
            entry.freq = freq + 1;
        }
        self.buckets
            .entry(freq + 1)
            .or_default()
            .push_front(&mut self.entries, idx);
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let min_freq = self.min_freq;
        let bucket = self.buckets.get_mut(&min_freq)?;
        let idx = bucket.pop_back(&mut self.entries)?;
        if bucket.is_empty() {
            self.buckets.remove(&min_freq);
        }

        let entry = self.entries.remove(idx)?;
        self.index.remove(&entry.key);
        trace!(freq = entry.freq, len = self.index.len(), "evicted lfu entry");
        Some((entry.key, entry.value))
    }
}

impl<K, V> Default for LfuCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Single-entry cache
    fn default() -> Self {
        Self::with_capacity(1)
    }
}

impl<K, V> Cache<K, V> for LfuCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        LfuCache::put(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<V> {
        LfuCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LfuCache::clear(self)
    }

    fn policy(&self) -> Policy {
        Policy::Lfu
    }
}
