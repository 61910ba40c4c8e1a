//! Cache Entry Module
//!
//! Defines the structure for individual TTL cache entries.

use std::time::{Duration, Instant};

// == TTL Entry ==
/// A stored value together with its expiration deadline.
#[derive(Debug, Clone)]
pub struct TtlEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant at which the entry becomes logically absent
    pub expires_at: Instant,
}

impl<V> TtlEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` after `now`.
    pub fn new(value: V, now: Instant, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now` is greater than
    /// or equal to its deadline, so a full TTL elapsing makes the entry
    /// immediately absent.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Remaining ==
    /// Returns the time left before expiry, or zero if already expired.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}
