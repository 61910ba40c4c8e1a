//! LRU Cache Module
//!
//! Size-bounded cache engine evicting the least recently used entry.

use std::fmt;
use std::hash::Hash;

use hashlink::LinkedHashMap;
use tracing::trace;

use crate::error::{CacheError, Result};

use super::Cache;

// == LRU Cache ==
/// Size-bounded cache with least-recently-used eviction.
///
/// Entries are kept in a linked hash map whose order encodes recency:
/// - Front = least recently used
/// - Back = most recently used
///
/// Every read and write of a key re-links it at the back, so recency is
/// a strict total order. When an insert would push the entry count past
/// `max_size`, the front entry is evicted.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key-value storage ordered by recency
    entries: LinkedHashMap<K, V>,
    /// Maximum number of entries allowed
    max_size: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new LruCache holding at most `max_size` entries.
    ///
    /// # Arguments
    /// * `max_size` - Capacity bound, must be greater than zero
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `max_size` is zero.
    pub fn new(max_size: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(CacheError::InvalidConfiguration(
                "max_size must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            entries: LinkedHashMap::new(),
            max_size,
        })
    }

    // == Get ==
    /// Retrieves a value by key and marks it as most recently used.
    ///
    /// Merely reading mutates the recency order: a hit re-links the
    /// entry at the back of the map.
    pub fn get(&mut self, key: &K) -> Result<V> {
        match self.entries.remove(key) {
            Some(value) => {
                let out = value.clone();
                self.entries.insert(key.clone(), value);
                Ok(out)
            }
            None => Err(CacheError::NotFound),
        }
    }

    // == Get Or ==
    /// Retrieves a value by key, or returns `default` if the key is absent.
    ///
    /// A hit still updates the recency order.
    pub fn get_or(&mut self, key: &K, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    // == Set ==
    /// Stores a key-value pair as the most recently used entry.
    ///
    /// If the key already exists its value is overwritten and it is
    /// re-linked at the back; the entry count does not change. If the key
    /// is new and the cache is at capacity, the least recently used entry
    /// is evicted first, so `len() <= max_size` holds even transiently.
    pub fn set(&mut self, key: K, value: V) {
        let existed = self.entries.remove(&key).is_some();
        if !existed && self.entries.len() >= self.max_size && self.entries.pop_front().is_some() {
            trace!(len = self.entries.len(), "evicted least recently used entry");
        }
        self.entries.insert(key, value);
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// # Errors
    /// Returns `NotFound` if the key is absent.
    pub fn delete(&mut self, key: &K) -> Result<()> {
        if self.entries.remove(key).is_some() {
            Ok(())
        } else {
            Err(CacheError::NotFound)
        }
    }

    // == Contains ==
    /// Checks whether a key exists.
    ///
    /// A pure predicate: the recency order is left untouched.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    // == Peek ==
    /// Returns a reference to the value for `key` without updating recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    // == Length ==
    /// Returns the current number of entries (always `<= max_size`).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Max Size ==
    /// Returns the configured capacity bound.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    // == Keys ==
    /// Iterates over the keys from least- to most-recently-used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// == Cache Trait Implementation ==
impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn get(&mut self, key: &K) -> Result<V> {
        LruCache::get(self, key)
    }

    fn set(&mut self, key: K, value: V) {
        LruCache::set(self, key, value);
    }

    fn delete(&mut self, key: &K) -> Result<()> {
        LruCache::delete(self, key)
    }

    fn contains(&mut self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn len(&mut self) -> usize {
        LruCache::len(self)
    }

    fn keys<'a>(&'a mut self) -> Box<dyn Iterator<Item = &'a K> + 'a> {
        Box::new(self.entries.keys())
    }
}

// == Display Implementation ==
/// Renders the live entries as `{k1: v1, k2: v2, ...}` in recency order
/// (least recently used first).
impl<K, V> fmt::Display for LruCache<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {:?}", key, value)?;
        }
        write!(f, "}}")
    }
}
