//! Typed cache layer over a raw [`CacheStore`].
//!
//! `PageCache` serializes [`CacheEntry`] snapshots to JSON and, crucially,
//! never lets a broken store or a corrupt stored value escape: both read
//! paths degrade to a cache miss with a `warn` log.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{CacheEntry, CacheStore, CollectionKey, StoreError, DEFAULT_TTL};

/// Typed page cache with corruption-as-miss semantics.
pub struct PageCache<T> {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
    _payload: PhantomData<fn() -> T>,
}

impl<T> PageCache<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a page cache over a store, with the default 5 minute TTL.
    pub fn new(store: impl CacheStore + 'static) -> Self {
        Self::with_store(Arc::new(store))
    }

    /// Create a page cache over a shared store.
    pub fn with_store(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            ttl: DEFAULT_TTL,
            _payload: PhantomData,
        }
    }

    /// Override the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The TTL entries are judged against.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fetch the stored entry for `key`.
    ///
    /// A store failure or an unparseable stored value is treated as absent:
    /// logged, never surfaced.
    pub async fn get(&self, key: &CollectionKey) -> Option<CacheEntry<T>> {
        let slot = key.storage_key();
        let raw = match self.store.get(&slot).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key = %slot, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(key = %slot, error = %e, "corrupt cache entry, treating as miss");
                None
            }
        }
    }

    /// Store a snapshot for `key`, replacing any previous entry.
    pub async fn put(&self, key: &CollectionKey, entry: &CacheEntry<T>) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entry)?;
        self.store.put(&key.storage_key(), raw).await
    }

    /// Check freshness of an entry against this cache's TTL.
    pub fn is_fresh(&self, entry: &CacheEntry<T>, now_ms: u64) -> bool {
        entry.is_fresh(now_ms, self.ttl)
    }
}
