//! Timestamped cache entries with TTL-based freshness.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default time-to-live for cached pages: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

/// A timestamped snapshot of one page's payload.
///
/// Entries are immutable once written; a newer snapshot fully replaces the
/// old one. `fetched_at_ms` is monotonically non-decreasing for a given key
/// because replacement only happens with a fresh network result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// When the payload was fetched, in milliseconds since the Unix epoch.
    pub fetched_at_ms: u64,
    /// The snapshot itself.
    pub payload: T,
}

impl<T> CacheEntry<T> {
    /// Create an entry fetched at the given instant.
    pub fn new(fetched_at_ms: u64, payload: T) -> Self {
        Self {
            fetched_at_ms,
            payload,
        }
    }

    /// Age of the entry relative to `now_ms`.
    pub fn age(&self, now_ms: u64) -> Duration {
        Duration::from_millis(now_ms.saturating_sub(self.fetched_at_ms))
    }

    /// An entry is fresh iff it is younger than the TTL.
    pub fn is_fresh(&self, now_ms: u64, ttl: Duration) -> bool {
        self.age(now_ms) < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_boundary() {
        let entry = CacheEntry::new(1_000, vec!["a"]);
        assert!(entry.is_fresh(1_000, DEFAULT_TTL));
        assert!(entry.is_fresh(1_000 + 299_999, DEFAULT_TTL));
        assert!(!entry.is_fresh(1_000 + 300_000, DEFAULT_TTL));
    }

    #[test]
    fn test_age_saturates_for_clock_skew() {
        let entry = CacheEntry::new(5_000, ());
        assert_eq!(entry.age(4_000), Duration::ZERO);
        assert!(entry.is_fresh(4_000, DEFAULT_TTL));
    }
}
