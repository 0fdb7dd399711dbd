//! Common surface shared by the LRU and LFU caches

use std::fmt;

/// Eviction policy of a cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Least recently used
    Lru,
    /// Least frequently used, least recently used among ties
    Lfu,
}

impl Policy {
    /// Short lowercase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Lru => "lru",
            Policy::Lfu => "lfu",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-capacity key-value cache
///
/// `get` counts as a use and may reorder the cache. Values handed out are
/// copies, never references into cache storage.
pub trait Cache<K, V> {
    /// Insert or overwrite `key`, returning the entry evicted to make room
    fn put(&mut self, key: K, value: V) -> Option<(K, V)>;

    /// Look up `key`, refreshing its position on a hit
    fn get(&mut self, key: &K) -> Option<V>;

    /// Check if `key` is cached without counting a use
    fn contains(&self, key: &K) -> bool;

    /// Number of live entries
    fn len(&self) -> usize;

    /// Check if the cache holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of live entries
    fn capacity(&self) -> usize;

    /// Drop every entry, keeping the capacity
    fn clear(&mut self);

    /// Eviction policy implemented by this cache
    fn policy(&self) -> Policy;
}
