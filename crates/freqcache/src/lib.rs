//! # freqcache
//!
//! Fixed-capacity in-memory caches with O(1) `get`/`put`.
//!
//! ## Architecture
//! - **Slab**: entries live in an arena addressed by stable `usize` handles
//! - **Lists**: intrusive doubly-linked lists of handles for recency order
//! - **LRU**: one recency list plus an AHash key index
//! - **LFU**: one recency list per frequency, a key index and a tracked
//!   minimum frequency for O(1) victim selection
//!
//! The caches do no locking. Wrap one in [`SharedCache`] to use it from
//! several threads.

#![warn(missing_docs)]

mod error;
mod lfu;
mod list;
mod lru;
mod policy;
mod shared;
mod slab;
mod stats;

pub use error::{Error, Result};
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use policy::{Cache, Policy};
pub use shared::SharedCache;
pub use stats::{CacheStats, StatsSnapshot};
