//! LRU (Least Recently Used) cache implementation
//!
//! Uses an intrusive linked list over a slab for O(1) eviction.

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

/// LRU cache with fixed capacity
pub struct LruCache<K, V> {
    map: HashMap<K, usize, RandomState>,
    entries: Slab<Entry<K, V>>,
    order: List,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Returns
    /// * `Err(Error::ZeroCapacity)` if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        debug!(capacity, "created lru cache");

        Ok(Self {
            // One spare slot: a put inserts before it evicts.
            map: HashMap::with_capacity_and_hasher(capacity + 1, RandomState::new()),
            entries: Slab::with_capacity(capacity + 1),
            order: List::new(),
            capacity,
        })
    }

    /// Get a copy of the value for `key`, marking it most recently used
    pub fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let idx = *self.map.get(key)?;
        self.order.move_to_front(&mut self.entries, idx);
        self.entries.get(idx).map(|entry| entry.value.clone())
    }

    /// Insert a key-value pair at the most recently used position
    ///
    /// An existing key has its value replaced. Returns the least recently
    /// used entry if the insert pushed the cache over capacity.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(entry) = self.entries.get_mut(idx) {
                entry.value = value;
            }
            self.order.move_to_front(&mut self.entries, idx);
            return None;
        }

        let idx = self.entries.insert(Entry {
            key: key.clone(),
            value,
            links: Links::default(),
        });
        self.order.push_front(&mut self.entries, idx);
        self.map.insert(key, idx);
        debug_assert_eq!(self.entries.len(), self.map.len());

        if self.map.len() > self.capacity {
            self.evict()
        } else {
            None
        }
    }

    /// Check if `key` is cached without touching its recency
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.map.clear();
        self.entries.clear();
        self.order = List::new();
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let idx = self.order.pop_back(&mut self.entries)?;
        let entry = self.entries.remove(idx)?;
        self.map.remove(&entry.key);
        trace!(len = self.map.len(), "evicted lru entry");
        Some((entry.key, entry.value))
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        LruCache::put(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<V> {
        LruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }

    fn policy(&self) -> Policy {
        Policy::Lru
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Keys from most to least recently used
    fn recency<K: Clone, V>(cache: &LruCache<K, V>) -> Vec<K> {
        let mut keys = Vec::new();
        let mut cursor = cache.order.head();
        while let Some(idx) = cursor {
            let entry = cache.entries.get(idx).unwrap();
            keys.push(entry.key.clone());
            cursor = entry.links.next;
        }
        keys
    }

    #[test]
    fn test_lru_basic() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.get(&1), Some("a"));
        assert_eq!(cache.get(&2), Some("b"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_zero_capacity() {
        assert_eq!(
            LruCache::<u32, u32>::new(0).err(),
            Some(Error::ZeroCapacity)
        );
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put(1, "a");
        cache.put(2, "b");
        let evicted = cache.put(3, "c");

        assert_eq!(evicted, Some((1, "a")));
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some("b"));
        assert_eq!(cache.get(&3), Some("c"));
    }

    #[test]
    fn test_lru_get_refreshes_recency() {
        let mut cache = LruCache::new(3).unwrap();

        cache.put("k1", 1);
        cache.put("k2", 2);
        cache.put("k3", 3);
        cache.get(&"k1");

        assert_eq!(recency(&cache), vec!["k1", "k3", "k2"]);
        assert_eq!(cache.put("k4", 4), Some(("k2", 2)));
        assert!(cache.contains(&"k1"));
        assert!(!cache.contains(&"k2"));
    }

    #[test]
    fn test_lru_overwrite() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.put(1, "c"), None);

        assert_eq!(recency(&cache), vec![1, 2]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), Some("c"));

        // 2 is now least recent
        assert_eq!(cache.put(3, "d"), Some((2, "b")));
    }

    #[test]
    fn test_lru_miss_has_no_side_effect() {
        let mut cache = LruCache::new(2).unwrap();

        cache.put(1, "a");
        cache.put(2, "b");
        let before = recency(&cache);

        assert_eq!(cache.get(&9), None);
        assert_eq!(cache.get(&9), None);
        assert_eq!(recency(&cache), before);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_capacity_one() {
        let mut cache = LruCache::new(1).unwrap();

        assert_eq!(cache.put(1, "a"), None);
        assert_eq!(cache.put(2, "b"), Some((1, "a")));
        assert_eq!(cache.put(2, "c"), None);
        assert_eq!(cache.get(&2), Some("c"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_capacity_invariant() {
        let mut cache = LruCache::new(8).unwrap();
        let mut state = 17u64;

        for i in 0..5_000u64 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let key = (state >> 33) % 23;
            if i % 3 == 0 {
                cache.get(&key);
            } else {
                cache.put(key, i);
            }
            assert!(cache.len() <= cache.capacity());
            assert_eq!(recency(&cache).len(), cache.len());
        }
    }

    #[test]
    fn test_lru_scenario() {
        let mut cache = LruCache::new(3).unwrap();

        cache.put(1, "r".to_string());
        cache.put(2, "a".to_string());
        cache.put(3, "y".to_string());

        assert_eq!(cache.get(&1), Some("r".to_string()));
        cache.put(4, "'".to_string());
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&4), Some("'".to_string()));
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = LruCache::new(3).unwrap();

        cache.put(1, "a");
        cache.put(2, "b");
        cache.clear();

        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);

        cache.put(3, "c");
        assert_eq!(cache.get(&3), Some("c"));
    }

    #[test]
    fn test_lru_via_trait() {
        let mut cache: Box<dyn Cache<u32, &str>> = Box::new(LruCache::new(1).unwrap());

        cache.put(1, "a");
        assert_eq!(cache.put(2, "b"), Some((1, "a")));
        assert_eq!(cache.policy(), Policy::Lru);
        assert_eq!(cache.capacity(), 1);
        assert!(!cache.is_empty());
    }
}
