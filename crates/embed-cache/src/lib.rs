//! Persistent page cache for embed instances.
//!
//! This crate provides:
//! - `CollectionKey` - Identifies one page of one collection for one owner
//! - `CacheEntry` - A timestamped snapshot with TTL-based freshness
//! - `CacheStore` - Injectable string-keyed storage capability
//! - `MemoryStore` / `FileStore` - Built-in store implementations
//! - `PageCache` - Typed layer with corruption-as-miss semantics
//!
//! # Example
//!
//! ```ignore
//! use embed_cache::{CollectionKey, MemoryStore, PageCache};
//! use embed_core::CollectionKind;
//!
//! let cache: PageCache<Vec<String>> = PageCache::new(MemoryStore::new());
//! let key = CollectionKey::new(CollectionKind::Shop, "alice", 0);
//! let entry = cache.get(&key).await; // None until the first put
//! ```

mod entry;
mod error;
mod key;
mod page;
mod store;

pub use entry::*;
pub use error::*;
pub use key::*;
pub use page::*;
pub use store::*;
