//! Seeded synthetic workload run through a `SharedCache`

use freqcache::{LfuCache, LruCache, Policy, Result, SharedCache, StatsSnapshot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Share of accesses that land in the hot key set
const HOT_ACCESS_RATIO: f64 = 0.8;

/// Workload shape
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Number of lookups
    pub ops: u64,
    /// Key space size, at least 1
    pub keys: u64,
    /// RNG seed
    pub seed: u64,
}

/// Build an empty shared cache for `policy`
pub fn build_cache(policy: Policy, capacity: usize) -> Result<SharedCache<u64, u64>> {
    let cache = match policy {
        Policy::Lru => SharedCache::new(LruCache::new(capacity)?),
        Policy::Lfu => SharedCache::new(LfuCache::new(capacity)?),
    };
    Ok(cache)
}

/// Issue `config.ops` lookups, filling the cache on every miss
///
/// The hot set is the lowest tenth of the key space and receives
/// `HOT_ACCESS_RATIO` of the lookups.
pub fn run(cache: &SharedCache<u64, u64>, config: &WorkloadConfig) -> StatsSnapshot {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let keys = config.keys.max(1);
    let hot = (keys / 10).max(1);

    for op in 0..config.ops {
        let key = if rng.random_bool(HOT_ACCESS_RATIO) {
            rng.random_range(0..hot)
        } else {
            rng.random_range(0..keys)
        };
        if cache.get(&key).is_none() {
            cache.put(key, op);
        }
    }

    let stats = cache.stats().snapshot();
    debug!(policy = cache.policy().as_str(), %stats, "workload finished");
    stats
}
