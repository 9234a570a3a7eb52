//! Polymorphic collection item records.
//!
//! Items are discriminated by a `type` tag. The known kinds cover what the
//! remote service emits today; anything else deserializes into
//! [`ItemRecord::Raw`], preserving the full original JSON so nothing is
//! silently lost. Serde aliases keep the legacy wire spellings working
//! (PascalCase product fields, mixed-case type tags).

use serde::{Deserialize, Deserializer, Serialize};

/// One item of a collection page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemRecord {
    /// An item of a recognized kind.
    Known(KnownItem),
    /// An item of an unrecognized kind, kept verbatim.
    Raw(serde_json::Value),
}

impl ItemRecord {
    /// The canonical lowercase kind name, used for allow-list filtering.
    ///
    /// Raw items report the `type` field of the original JSON when present,
    /// otherwise `"unknown"`.
    pub fn kind(&self) -> &str {
        match self {
            ItemRecord::Known(item) => item.kind(),
            ItemRecord::Raw(value) => value
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("unknown"),
        }
    }
}

/// The item kinds the service is known to emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KnownItem {
    #[serde(alias = "Message")]
    Message(MessageItem),
    #[serde(alias = "Poll")]
    Poll(PostItem),
    #[serde(alias = "Post")]
    Post(PostItem),
    #[serde(alias = "Image")]
    Image(PostItem),
    #[serde(alias = "Tip")]
    Tip(TipItem),
    #[serde(alias = "Supporter")]
    Supporter(SupporterItem),
    #[serde(alias = "Member")]
    Member(MemberItem),
    #[serde(alias = "Product")]
    Product(ProductItem),
    #[serde(rename = "leaderboard-entry")]
    LeaderboardEntry(LeaderboardEntryItem),
}

impl KnownItem {
    pub fn kind(&self) -> &'static str {
        match self {
            KnownItem::Message(_) => "message",
            KnownItem::Poll(_) => "poll",
            KnownItem::Post(_) => "post",
            KnownItem::Image(_) => "image",
            KnownItem::Tip(_) => "tip",
            KnownItem::Supporter(_) => "supporter",
            KnownItem::Member(_) => "member",
            KnownItem::Product(_) => "product",
            KnownItem::LeaderboardEntry(_) => "leaderboard-entry",
        }
    }
}

/// A plain feed message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A post-shaped item: polls, posts and gallery images share this layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Subscriber-only content marker.
    #[serde(default, skip_serializing_if = "is_false")]
    pub locked: bool,
}

/// A tip with an optional creator reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A one-off supporter shout-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupporterItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A recurring member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A shop or commission product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductItem {
    #[serde(default, alias = "Title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "Image", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Price as displayed; the service sends either a string or a number.
    #[serde(
        default,
        alias = "Price",
        deserialize_with = "de_opt_display_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<String>,
    #[serde(default, alias = "Orders", skip_serializing_if = "Option::is_none")]
    pub orders: Option<u64>,
    #[serde(default, alias = "Link", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, alias = "SoldOut", skip_serializing_if = "is_false")]
    pub sold_out: bool,
}

/// One row of the supporter leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        alias = "profilePicture",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Accept a JSON string or number and keep its display form.
fn de_opt_display_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feed_kinds_parse_with_legacy_casing() {
        // The service historically mixed "Message"/"Post" with lowercase tags.
        let item: ItemRecord =
            serde_json::from_value(json!({"type": "Message", "message": "hi"})).unwrap();
        assert_eq!(item.kind(), "message");

        let item: ItemRecord = serde_json::from_value(
            json!({"type": "Post", "title": "T", "description": "D", "locked": true}),
        )
        .unwrap();
        assert_eq!(item.kind(), "post");
        match item {
            ItemRecord::Known(KnownItem::Post(post)) => {
                assert_eq!(post.title.as_deref(), Some("T"));
                assert!(post.locked);
                assert!(post.image.is_none());
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_product_accepts_pascal_case_fields() {
        let item: ItemRecord = serde_json::from_value(json!({
            "type": "product",
            "Title": "Sticker pack",
            "Image": "https://cdn.example/s.png",
            "Price": 4.5,
            "Orders": 12,
            "Link": "https://shop.example/s",
            "SoldOut": true
        }))
        .unwrap();
        match item {
            ItemRecord::Known(KnownItem::Product(p)) => {
                assert_eq!(p.title.as_deref(), Some("Sticker pack"));
                assert_eq!(p.price.as_deref(), Some("4.5"));
                assert_eq!(p.orders, Some(12));
                assert!(p.sold_out);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_round_trips_losslessly() {
        let original = json!({"type": "hologram", "payload": {"x": 1}, "n": [1, 2]});
        let item: ItemRecord = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(item.kind(), "hologram");
        assert_eq!(serde_json::to_value(&item).unwrap(), original);
    }

    #[test]
    fn test_untyped_object_reports_unknown() {
        let item: ItemRecord = serde_json::from_value(json!({"message": "?" })).unwrap();
        assert_eq!(item.kind(), "unknown");
    }

    #[test]
    fn test_structural_equality() {
        let a: ItemRecord =
            serde_json::from_value(json!({"type": "tip", "user": "u", "message": "m"})).unwrap();
        let b: ItemRecord =
            serde_json::from_value(json!({"type": "tip", "user": "u", "message": "m"})).unwrap();
        let c: ItemRecord =
            serde_json::from_value(json!({"type": "tip", "user": "u", "message": "other"}))
                .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_leaderboard_entry_aliases() {
        let item: ItemRecord = serde_json::from_value(json!({
            "type": "leaderboard-entry",
            "order": 1,
            "name": "Top Fan",
            "profilePicture": "https://cdn.example/p.png"
        }))
        .unwrap();
        match item {
            ItemRecord::Known(KnownItem::LeaderboardEntry(e)) => {
                assert_eq!(e.order, Some(1));
                assert_eq!(e.profile_picture.as_deref(), Some("https://cdn.example/p.png"));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }
}
