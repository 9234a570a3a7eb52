//! The embeddable collection types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A remote collection that can be embedded.
///
/// The lowercase name is stable: it doubles as the endpoint path segment
/// and as a cache key segment, so the same collection always maps to the
/// same remote resource and the same cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Shop products.
    Shop,
    /// Commission listings.
    Commissions,
    /// Activity feed (posts, tips, polls, ...).
    Feed,
    /// Top supporters leaderboard.
    Leaderboard,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Shop => "shop",
            CollectionKind::Commissions => "commissions",
            CollectionKind::Feed => "feed",
            CollectionKind::Leaderboard => "leaderboard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shop" => Some(CollectionKind::Shop),
            "commissions" => Some(CollectionKind::Commissions),
            "feed" => Some(CollectionKind::Feed),
            "leaderboard" => Some(CollectionKind::Leaderboard),
            _ => None,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_stable() {
        for kind in [
            CollectionKind::Shop,
            CollectionKind::Commissions,
            CollectionKind::Feed,
            CollectionKind::Leaderboard,
        ] {
            assert_eq!(CollectionKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(CollectionKind::from_str("Shop"), Some(CollectionKind::Shop));
        assert_eq!(CollectionKind::from_str("gallery"), None);
    }
}
