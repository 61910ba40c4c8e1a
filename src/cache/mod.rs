//! Cache Module
//!
//! Provides in-memory caching with two interchangeable eviction policies:
//! LRU (size-bounded) and TTL (time-bounded).

mod entry;
mod lru;
mod ttl;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::TtlEntry;
pub use lru::LruCache;
pub use ttl::TtlCache;

use std::fmt;

use crate::error::Result;

// == Cache Trait ==
/// The mapping contract shared by both eviction engines.
///
/// Either engine can be used anywhere a bounded key-value store is
/// expected. All operations are synchronous and single-threaded; callers
/// needing thread safety must wrap the cache in their own lock.
///
/// Rendering is part of the contract: every engine displays its live
/// entries as `{k1: v1, k2: v2, ...}` in policy order, so `to_string()`
/// works on a trait object too.
pub trait Cache<K, V>: fmt::Display {
    /// Retrieves an owned copy of the value for `key`.
    ///
    /// For the LRU engine this marks the key as most recently used; for
    /// the TTL engine an expired entry is removed and reported as a miss.
    fn get(&mut self, key: &K) -> Result<V>;

    /// Retrieves the value for `key`, or `default` on a miss.
    fn get_or(&mut self, key: &K, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// Overwriting resets the key's recency (LRU) or expiry timer (TTL).
    fn set(&mut self, key: K, value: V);

    /// Removes the entry for `key`, failing with `NotFound` if absent.
    fn delete(&mut self, key: &K) -> Result<()>;

    /// Checks whether `key` is live in the cache.
    fn contains(&mut self, key: &K) -> bool;

    /// Returns the number of live entries.
    fn len(&mut self) -> usize;

    /// Returns true if the cache holds no live entries.
    fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Iterates over the live keys in policy-defined order.
    ///
    /// LRU: least- to most-recently-used. TTL: insertion order among
    /// surviving entries.
    fn keys<'a>(&'a mut self) -> Box<dyn Iterator<Item = &'a K> + 'a>;
}
