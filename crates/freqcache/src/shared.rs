//! SharedCache: exclusive-access wrapper for using a cache across threads
//!
//! The LRU and LFU cores take `&mut self` for every lookup, so sharing one
//! means serializing each call behind a lock. The wrapper also keeps the
//! hit/miss counters.

use std::sync::Arc;
use parking_lot::Mutex;
use tracing::trace;

use crate::policy::{Cache, Policy};
use crate::stats::CacheStats;

type BoxedCache<K, V> = Box<dyn Cache<K, V> + Send>;

/// Thread-safe handle to a cache of either policy
///
/// Cloning the handle shares the same cache and statistics.
pub struct SharedCache<K, V> {
    /// Cache protected by an exclusive lock
    inner: Arc<Mutex<BoxedCache<K, V>>>,

    /// Cache statistics
    stats: Arc<CacheStats>,

    /// Fixed at construction
    policy: Policy,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            stats: Arc::clone(&self.stats),
            policy: self.policy,
        }
    }
}

impl<K, V> SharedCache<K, V> {
    /// Wrap a cache, taking ownership of it
    pub fn new<C>(cache: C) -> Self
    where
        C: Cache<K, V> + Send + 'static,
    {
        let policy = cache.policy();
        Self {
            inner: Arc::new(Mutex::new(Box::new(cache))),
            stats: Arc::new(CacheStats::new()),
            policy,
        }
    }

    /// Put a value into the cache
    ///
    /// # Returns
    /// * The entry evicted to make room, if any
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        let evicted = self.inner.lock().put(key, value);
        let evicted_any = evicted.is_some();
        self.stats.record_insert(evicted_any);
        if evicted_any {
            trace!(policy = self.policy.as_str(), "put evicted an entry");
        }
        evicted
    }

    /// Get a copy of a cached value
    pub fn get(&self, key: &K) -> Option<V> {
        let value = self.inner.lock().get(key);
        let hit = value.is_some();
        self.stats.record_lookup(hit);
        trace!(policy = self.policy.as_str(), hit, "cache lookup");
        value
    }

    /// Check if `key` is cached without counting a use
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Eviction policy of the wrapped cache
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Clear the cache and reset statistics
    pub fn clear(&self) {
        self.inner.lock().clear();
        self.stats.reset();
    }

    /// Run `f` with exclusive access to the wrapped cache
    ///
    /// Calls made through `f` are not counted in the statistics.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut dyn Cache<K, V>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(guard.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use crate::{LfuCache, LruCache};

    #[test]
    fn test_shared_basic() {
        let cache = SharedCache::new(LruCache::new(10).unwrap());

        cache.put(1u64, "test data".to_string());
        assert_eq!(cache.get(&1), Some("test data".to_string()));
        assert_eq!(cache.get(&2), None);

        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 1);
        assert_eq!(cache.stats().inserts(), 1);
        assert_eq!(cache.policy(), Policy::Lru);
    }

    #[test]
    fn test_shared_counts_evictions() {
        let cache = SharedCache::new(LfuCache::new(2).unwrap());

        cache.put(1u32, 10u32);
        cache.put(2, 20);
        cache.get(&1);
        assert_eq!(cache.put(3, 30), Some((2, 20)));

        assert_eq!(cache.stats().evictions(), 1);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.policy(), Policy::Lfu);
    }

    #[test]
    fn test_shared_clear() {
        let cache = SharedCache::new(LruCache::new(4).unwrap());

        cache.put(1u32, 1u32);
        cache.get(&1);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits(), 0);
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn test_shared_with_lock_bypasses_stats() {
        let cache = SharedCache::new(LfuCache::new(4).unwrap());

        cache.put(1u32, "a");
        let found = cache.with_lock(|inner| inner.get(&1));

        assert_eq!(found, Some("a"));
        assert!(cache.contains(&1));
        assert_eq!(cache.stats().hits(), 0);
        assert_eq!(cache.stats().misses(), 0);
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = SharedCache::new(LruCache::new(64).unwrap());

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..250u64 {
                        let key = t * 1000 + i % 50;
                        if cache.get(&key).is_none() {
                            cache.put(key, i);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = cache.stats().snapshot();
        assert_eq!(stats.hits + stats.misses, 1000);
        assert_eq!(stats.inserts, stats.misses);
        assert!(cache.len() <= 64);
    }
}
