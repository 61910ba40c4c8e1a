//! TTL Cache Module
//!
//! Time-bounded cache engine expiring entries a fixed duration after
//! insertion, with lazy removal on access or enumeration.

use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use hashlink::LinkedHashMap;
use tracing::{debug, trace};

use crate::cache::TtlEntry;
use crate::error::{CacheError, Result};

use super::Cache;

// == TTL Cache ==
/// Time-bounded cache where every entry expires `ttl` after its last
/// insertion or update.
///
/// Expiration is purely lazy: the clock is read once per operation and
/// stale entries are removed only when touched or enumerated. There is no
/// background sweep, so a key that is never touched after expiry stays
/// physically resident until [`TtlCache::purge_expired`] or an enumerating
/// operation runs. Entry count is unbounded.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    /// Key-value storage in insertion order, each with its deadline
    entries: LinkedHashMap<K, TtlEntry<V>>,
    /// Lifetime applied to every inserted entry
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new TtlCache whose entries live for `ttl`.
    ///
    /// # Arguments
    /// * `ttl` - Entry lifetime, must be greater than zero
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `ttl` is zero.
    pub fn new(ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidConfiguration(
                "ttl must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            entries: LinkedHashMap::new(),
            ttl,
        })
    }

    // == Expire One ==
    /// Removes `key` if its entry has expired as of `now`.
    ///
    /// Every read-style operation runs this first, so an expired entry is
    /// treated exactly as if it had never been stored.
    fn expire_one(&mut self, key: &K, now: Instant) {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(now));
        if expired {
            self.entries.remove(key);
            trace!("removed expired entry on access");
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// An expired entry is removed and reported as `NotFound`. Unlike the
    /// LRU engine, a hit has no side effect on ordering.
    pub fn get(&mut self, key: &K) -> Result<V> {
        let now = Instant::now();
        self.expire_one(key, now);
        match self.entries.get(key) {
            Some(entry) => Ok(entry.value.clone()),
            None => Err(CacheError::NotFound),
        }
    }

    // == Get Or ==
    /// Retrieves a value by key, or returns `default` if the key is
    /// absent or expired.
    pub fn get_or(&mut self, key: &K, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    // == Set ==
    /// Stores a key-value pair expiring `ttl` from now.
    ///
    /// Re-inserting an existing key overwrites its value and
    /// unconditionally resets its expiry timer, but keeps the key at its
    /// first-insertion position in the iteration order.
    pub fn set(&mut self, key: K, value: V) {
        let now = Instant::now();
        self.entries.replace(key, TtlEntry::new(value, now, self.ttl));
    }

    // == Delete ==
    /// Removes an entry by key. Deletion is unconditional, so no expiry
    /// check is needed first.
    ///
    /// # Errors
    /// Returns `NotFound` if the key is physically absent.
    pub fn delete(&mut self, key: &K) -> Result<()> {
        if self.entries.remove(key).is_some() {
            Ok(())
        } else {
            Err(CacheError::NotFound)
        }
    }

    // == Contains ==
    /// Checks whether a key exists and has not expired.
    pub fn contains(&mut self, key: &K) -> bool {
        let now = Instant::now();
        self.expire_one(key, now);
        self.entries.contains_key(key)
    }

    // == Remaining TTL ==
    /// Returns the time left before `key` expires, or `None` if the key
    /// is absent or already expired.
    pub fn remaining_ttl(&mut self, key: &K) -> Option<Duration> {
        let now = Instant::now();
        self.expire_one(key, now);
        self.entries.get(key).map(|entry| entry.remaining(now))
    }

    // == Purge Expired ==
    /// Removes every expired entry and returns the number removed.
    ///
    /// Callers that need active reclamation (rather than this engine's
    /// lazy, touch-time removal) can invoke this from a periodic sweep of
    /// their own.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let removed = expired_keys.len();
        for key in expired_keys {
            self.entries.remove(&key);
        }
        if removed > 0 {
            debug!(removed, "purged expired entries");
        }
        removed
    }

    // == Length ==
    /// Returns the number of non-expired entries.
    ///
    /// Prunes all expired entries first, an O(n) sweep traded for an
    /// always-accurate count.
    pub fn len(&mut self) -> usize {
        self.purge_expired();
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no live entries remain.
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    // == TTL ==
    /// Returns the configured entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Keys ==
    /// Iterates over the non-expired keys in insertion order.
    ///
    /// Expired entries are pruned before the iterator is produced, so
    /// every yielded key is live at the instant of the call.
    pub fn keys(&mut self) -> impl Iterator<Item = &K> {
        self.purge_expired();
        self.entries.keys()
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// == Cache Trait Implementation ==
impl<K, V> Cache<K, V> for TtlCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn get(&mut self, key: &K) -> Result<V> {
        TtlCache::get(self, key)
    }

    fn set(&mut self, key: K, value: V) {
        TtlCache::set(self, key, value);
    }

    fn delete(&mut self, key: &K) -> Result<()> {
        TtlCache::delete(self, key)
    }

    fn contains(&mut self, key: &K) -> bool {
        TtlCache::contains(self, key)
    }

    fn len(&mut self) -> usize {
        TtlCache::len(self)
    }

    fn keys<'a>(&'a mut self) -> Box<dyn Iterator<Item = &'a K> + 'a> {
        self.purge_expired();
        Box::new(self.entries.keys())
    }
}

// == Display Implementation ==
/// Renders the non-expired entries as `{k1: v1, k2: v2, ...}` in
/// insertion order. Stale entries are skipped rather than removed, since
/// formatting only has shared access.
impl<K, V> fmt::Display for TtlCache<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let now = Instant::now();
        write!(f, "{{")?;
        let mut first = true;
        for (key, entry) in self.entries.iter() {
            if entry.is_expired(now) {
                continue;
            }
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {:?}", key, entry.value)?;
            first = false;
        }
        write!(f, "}}")
    }
}
