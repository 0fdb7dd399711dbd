//! Fixed put/get sequences replayed against a fresh capacity-3 cache

use freqcache::{Cache, LfuCache, LruCache, Policy, Result};

/// Capacity used by both scenarios
pub const CAPACITY: usize = 3;

/// Replay the scenario for `policy`, returning the result of each `get`
///
/// LRU: the `get` of 1 saves it, so the fourth key evicts 2.
/// LFU: 1 and 2 are both read once, so the fourth key evicts 3.
pub fn run(policy: Policy) -> Result<Vec<Option<String>>> {
    let lookups = match policy {
        Policy::Lru => {
            let mut cache = LruCache::new(CAPACITY)?;
            fill(&mut cache);
            let first = cache.get(&1);
            cache.put(4, "'".to_string());
            vec![first, cache.get(&2)]
        }
        Policy::Lfu => {
            let mut cache = LfuCache::new(CAPACITY)?;
            fill(&mut cache);
            let first = cache.get(&1);
            let second = cache.get(&2);
            cache.put(4, "s".to_string());
            vec![first, second, cache.get(&3)]
        }
    };
    Ok(lookups)
}

fn fill(cache: &mut impl Cache<u32, String>) {
    for (key, value) in [(1, "r"), (2, "a"), (3, "y")] {
        cache.put(key, value.to_string());
    }
}

/// Render a lookup as `value = <v>, ret = <found>`
pub fn format_lookup(lookup: &Option<String>) -> String {
    format!(
        "value = {}, ret = {}",
        lookup.as_deref().unwrap_or(""),
        lookup.is_some()
    )
}
