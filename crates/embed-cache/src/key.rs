//! Cache key composition.

use std::fmt;

use embed_core::{CollectionKind, OwnerId};
use serde::{Deserialize, Serialize};

/// Identifies one page of one collection for one owner.
///
/// The storage key is deterministic: the same (collection, owner, page)
/// always maps to the same slot, so independent embed instances sharing an
/// owner also share cached pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionKey {
    pub collection: CollectionKind,
    pub owner: OwnerId,
    pub page: u32,
}

impl CollectionKey {
    /// Create a key for one page of a collection.
    pub fn new(collection: CollectionKind, owner: impl Into<OwnerId>, page: u32) -> Self {
        Self {
            collection,
            owner: owner.into(),
            page,
        }
    }

    /// The string slot this key occupies in a store.
    ///
    /// Kept readable rather than hashed: four short segments, and readable
    /// keys can be inspected in the host's storage tooling.
    pub fn storage_key(&self) -> String {
        format!(
            "embed:{}:{}:page:{}",
            self.collection, self.owner, self.page
        )
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_is_deterministic() {
        let a = CollectionKey::new(CollectionKind::Shop, "alice", 2);
        let b = CollectionKey::new(CollectionKind::Shop, "alice", 2);
        assert_eq!(a.storage_key(), b.storage_key());
        assert_eq!(a.storage_key(), "embed:shop:alice:page:2");
    }

    #[test]
    fn test_storage_key_distinguishes_segments() {
        let base = CollectionKey::new(CollectionKind::Shop, "alice", 0);
        let other_page = CollectionKey::new(CollectionKind::Shop, "alice", 1);
        let other_owner = CollectionKey::new(CollectionKind::Shop, "bob", 0);
        let other_collection = CollectionKey::new(CollectionKind::Feed, "alice", 0);
        assert_ne!(base.storage_key(), other_page.storage_key());
        assert_ne!(base.storage_key(), other_owner.storage_key());
        assert_ne!(base.storage_key(), other_collection.storage_key());
    }
}
