//! Memocache - A lightweight in-memory cache library
//!
//! Provides two interchangeable single-threaded cache engines:
//!
//! - [`LruCache`]: size-bounded, evicts the least recently used entry
//!   when a fixed capacity would be exceeded.
//! - [`TtlCache`]: time-bounded, entries expire a fixed duration after
//!   insertion and are removed lazily on access or enumeration.
//!
//! Both implement the [`Cache`] trait, so either can back any code that
//! expects a bounded key-value store. Neither performs background work or
//! internal locking; wrap an instance in your own mutex if it must be
//! shared across threads.
//!
//! # Example: memoizing a pure function
//!
//! ```
//! use memocache::LruCache;
//!
//! fn expensive(n: u64) -> u64 {
//!     n * n
//! }
//!
//! let mut cache = LruCache::new(100).unwrap();
//!
//! let mut memoized = |n: u64| match cache.get(&n) {
//!     Ok(result) => result,
//!     Err(_) => {
//!         let result = expensive(n);
//!         cache.set(n, result);
//!         result
//!     }
//! };
//!
//! assert_eq!(memoized(7), 49);
//! assert_eq!(memoized(7), 49); // served from the cache
//! ```

pub mod cache;
pub mod error;

pub use cache::{Cache, LruCache, TtlCache};
pub use error::{CacheError, Result};
