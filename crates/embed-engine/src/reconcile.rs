//! Cache-vs-network reconciliation.
//!
//! Pure decision logic: given what the cache held and what the network
//! answered, pick the one action the session applies. Keeping this free of
//! I/O makes the flicker-avoidance rules directly testable.

use std::time::Duration;

use embed_cache::CacheEntry;
use embed_data::{FetchError, ItemRecord, PageBody};

/// What to do with a page after its fresh result arrived.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileAction {
    /// Fresh cache already showed identical data: zero render operations.
    Unchanged,
    /// Clear the page's prior render, render the fresh items, write a new
    /// cache entry.
    Replace,
    /// The page is empty: pagination is exhausted, nothing rendered, no
    /// cache write.
    Exhausted,
    /// The fetch failed: surface the message once, keep any optimistic
    /// render, no cache write, no advance.
    Failed { message: String },
}

/// Decide how to reconcile a cached snapshot with a fresh fetch result.
///
/// Staleness alone forces a replace: a TTL-expired entry is re-rendered and
/// re-written even when the fresh payload is identical.
pub fn decide(
    cached: Option<&CacheEntry<Vec<ItemRecord>>>,
    fresh: &Result<PageBody, FetchError>,
    now_ms: u64,
    ttl: Duration,
) -> ReconcileAction {
    let body = match fresh {
        Err(e) => {
            return ReconcileAction::Failed {
                message: e.to_string(),
            }
        }
        Ok(body) => body,
    };

    if body.is_empty() {
        return ReconcileAction::Exhausted;
    }

    match cached {
        Some(entry) if entry.is_fresh(now_ms, ttl) && entry.payload == body.items => {
            ReconcileAction::Unchanged
        }
        _ => ReconcileAction::Replace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embed_cache::DEFAULT_TTL;
    use serde_json::json;

    fn items(names: &[&str]) -> Vec<ItemRecord> {
        names
            .iter()
            .map(|n| serde_json::from_value(json!({"type": "product", "Title": n})).unwrap())
            .collect()
    }

    fn page(names: &[&str]) -> Result<PageBody, FetchError> {
        Ok(PageBody {
            items: items(names),
            curator_avatar: None,
        })
    }

    #[test]
    fn test_fresh_identical_cache_is_unchanged() {
        let cached = CacheEntry::new(0, items(&["A", "B"]));
        // 4 minutes later: still fresh.
        let action = decide(Some(&cached), &page(&["A", "B"]), 240_000, DEFAULT_TTL);
        assert_eq!(action, ReconcileAction::Unchanged);
    }

    #[test]
    fn test_stale_identical_cache_still_replaces() {
        let cached = CacheEntry::new(0, items(&["A", "B"]));
        let action = decide(Some(&cached), &page(&["A", "B"]), 300_000, DEFAULT_TTL);
        assert_eq!(action, ReconcileAction::Replace);
    }

    #[test]
    fn test_fresh_cache_with_different_payload_replaces() {
        let cached = CacheEntry::new(0, items(&["A", "B"]));
        let action = decide(Some(&cached), &page(&["A", "C"]), 1_000, DEFAULT_TTL);
        assert_eq!(action, ReconcileAction::Replace);
    }

    #[test]
    fn test_order_matters_for_equality() {
        let cached = CacheEntry::new(0, items(&["A", "B"]));
        let action = decide(Some(&cached), &page(&["B", "A"]), 1_000, DEFAULT_TTL);
        assert_eq!(action, ReconcileAction::Replace);
    }

    #[test]
    fn test_no_cache_replaces() {
        let action = decide(None, &page(&["A"]), 0, DEFAULT_TTL);
        assert_eq!(action, ReconcileAction::Replace);
    }

    #[test]
    fn test_empty_page_is_exhausted_even_with_cache() {
        let cached = CacheEntry::new(0, items(&["A"]));
        let action = decide(Some(&cached), &page(&[]), 1_000, DEFAULT_TTL);
        assert_eq!(action, ReconcileAction::Exhausted);
    }

    #[test]
    fn test_failure_keeps_optimistic_render() {
        let cached = CacheEntry::new(0, items(&["A"]));
        let fresh = Err(FetchError::Connection("refused".to_string()));
        let action = decide(Some(&cached), &fresh, 1_000, DEFAULT_TTL);
        assert!(matches!(action, ReconcileAction::Failed { .. }));
    }
}
