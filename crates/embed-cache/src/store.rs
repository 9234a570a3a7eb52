//! Pluggable string-keyed storage.
//!
//! The store is the host-persistent half of the cache; it holds opaque
//! strings and knows nothing about pages or freshness. Injecting it as a
//! capability lets tests swap in [`MemoryStore`] and hosts provide whatever
//! persistence they have.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::StoreError;

/// String-keyed get/put against host-persistent storage.
///
/// Each `put` is independently atomic from the caller's perspective; writes
/// for the same key are last-writer-wins with no cross-key transactionality.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get the raw value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// In-memory store, shared across sessions via `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// File-backed store: one file per key under a root directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first put.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys contain ':' which is not portable in file names. The escape
        // must be invertible: distinct keys map to distinct files, so one
        // owner's page can never clobber another's. '_' is the escape
        // character and is itself escaped.
        let mut file_name = String::with_capacity(key.len());
        for &b in key.as_bytes() {
            match b {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' => file_name.push(b as char),
                _ => file_name.push_str(&format!("_{b:02x}")),
            }
        }
        self.root.join(format!("{file_name}.json"))
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.path_for(key), value).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.put("k", "v1".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v1"));
        // Last writer wins.
        store.put("k", "v2".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("embed:shop:alice:page:0").await.unwrap(), None);
        store
            .put("embed:shop:alice:page:0", "{}".to_string())
            .await
            .unwrap();
        assert_eq!(
            store.get("embed:shop:alice:page:0").await.unwrap().as_deref(),
            Some("{}")
        );
    }

    #[tokio::test]
    async fn test_file_store_distinct_keys_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.put("embed:shop:alice:page:0", "a".into()).await.unwrap();
        store.put("embed:shop:alice:page:1", "b".into()).await.unwrap();
        assert_eq!(
            store.get("embed:shop:alice:page:0").await.unwrap().as_deref(),
            Some("a")
        );
        assert_eq!(
            store.get("embed:shop:alice:page:1").await.unwrap().as_deref(),
            Some("b")
        );
    }

    #[tokio::test]
    async fn test_file_store_escaped_characters_never_alias() {
        // Owners "a.b" and "a_b" differ only in characters the file name
        // escapes; they must not share a slot.
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store
            .put("embed:shop:a.b:page:0", "owner-a.b".into())
            .await
            .unwrap();
        store
            .put("embed:shop:a_b:page:0", "owner-a_b".into())
            .await
            .unwrap();
        assert_eq!(
            store.get("embed:shop:a.b:page:0").await.unwrap().as_deref(),
            Some("owner-a.b")
        );
        assert_eq!(
            store.get("embed:shop:a_b:page:0").await.unwrap().as_deref(),
            Some("owner-a_b")
        );
    }
}
