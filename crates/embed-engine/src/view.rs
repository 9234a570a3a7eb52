//! Presentation-ready item projections.
//!
//! A view record carries only the fields its kind defines; optional fields
//! that are absent are omitted on serialization rather than rendered as
//! empty placeholders. Unrecognized kinds become [`ViewRecord::Raw`] so the
//! sink can show a diagnostic dump instead of dropping them.

use serde::Serialize;

use embed_core::{EmbedConfig, SoldOutMode};
use embed_data::{ItemRecord, KnownItem};

/// One renderable item, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ViewRecord {
    Message {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    Poll {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    Post {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        locked: bool,
    },
    Image {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        locked: bool,
    },
    Tip {
        #[serde(skip_serializing_if = "Option::is_none")]
        user: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    Supporter {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    Member {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    Product {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<String>,
        /// Price with the configured currency symbol prefixed.
        #[serde(skip_serializing_if = "Option::is_none")]
        price: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        orders: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        sold_out: bool,
    },
    LeaderboardEntry {
        #[serde(skip_serializing_if = "Option::is_none")]
        order: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        avatar: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    /// Diagnostic view of an unrecognized item, kept verbatim.
    Raw { raw: serde_json::Value },
}

/// Builds view records from item records for one embed instance.
#[derive(Debug, Clone)]
pub struct ViewBuilder {
    allow_kinds: Option<std::collections::HashSet<String>>,
    sold_out: SoldOutMode,
    currency: Option<String>,
}

impl ViewBuilder {
    /// Derive a builder from instance configuration.
    pub fn from_config(config: &EmbedConfig) -> Self {
        Self {
            allow_kinds: config.allow_kinds.clone(),
            sold_out: config.sold_out,
            currency: config.currency.clone(),
        }
    }

    /// Build the view records for one page of items.
    ///
    /// Items whose kind is not in the allow-list are dropped silently, in
    /// order; sold-out products are dropped when so configured.
    pub fn build_page(&self, items: &[ItemRecord]) -> Vec<ViewRecord> {
        items
            .iter()
            .filter(|item| self.allowed(item))
            .filter(|item| self.visible(item))
            .map(|item| self.build(item))
            .collect()
    }

    fn allowed(&self, item: &ItemRecord) -> bool {
        match &self.allow_kinds {
            Some(allowed) => allowed.contains(&item.kind().to_lowercase()),
            None => true,
        }
    }

    fn visible(&self, item: &ItemRecord) -> bool {
        match item {
            ItemRecord::Known(KnownItem::Product(p)) => {
                !(self.sold_out == SoldOutMode::Hide && p.sold_out)
            }
            _ => true,
        }
    }

    fn price_display(&self, price: &Option<String>) -> Option<String> {
        let price = price.as_deref()?;
        Some(match &self.currency {
            Some(symbol) => format!("{symbol}{price}"),
            None => price.to_string(),
        })
    }

    fn build(&self, item: &ItemRecord) -> ViewRecord {
        let known = match item {
            ItemRecord::Known(known) => known,
            ItemRecord::Raw(value) => {
                return ViewRecord::Raw { raw: value.clone() };
            }
        };
        match known {
            KnownItem::Message(m) => ViewRecord::Message {
                text: m.message.clone(),
            },
            KnownItem::Poll(p) => ViewRecord::Poll {
                title: p.title.clone(),
                description: p.description.clone(),
                image: p.image.clone(),
                link: p.link.clone(),
            },
            KnownItem::Post(p) => ViewRecord::Post {
                title: p.title.clone(),
                description: p.description.clone(),
                image: p.image.clone(),
                link: p.link.clone(),
                locked: p.locked,
            },
            KnownItem::Image(p) => ViewRecord::Image {
                title: p.title.clone(),
                description: p.description.clone(),
                image: p.image.clone(),
                link: p.link.clone(),
                locked: p.locked,
            },
            KnownItem::Tip(t) => ViewRecord::Tip {
                user: t.user.clone(),
                message: t.message.clone(),
                reply: t.reply.clone(),
                image: t.image.clone(),
                link: t.link.clone(),
            },
            KnownItem::Supporter(s) => ViewRecord::Supporter {
                name: s.name.clone(),
                message: s.message.clone(),
                link: s.link.clone(),
            },
            KnownItem::Member(m) => ViewRecord::Member {
                name: m.name.clone(),
                message: m.message.clone(),
                image: m.image.clone(),
                link: m.link.clone(),
            },
            KnownItem::Product(p) => ViewRecord::Product {
                title: p.title.clone(),
                description: p.description.clone(),
                image: p.image.clone(),
                price: self.price_display(&p.price),
                orders: p.orders,
                link: p.link.clone(),
                sold_out: p.sold_out,
            },
            KnownItem::LeaderboardEntry(e) => ViewRecord::LeaderboardEntry {
                order: e.order,
                name: e.name.clone(),
                avatar: e.profile_picture.clone(),
                link: e.link.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embed_core::CollectionKind;
    use serde_json::json;

    fn builder(config: EmbedConfig) -> ViewBuilder {
        ViewBuilder::from_config(&config)
    }

    fn parse(items: serde_json::Value) -> Vec<ItemRecord> {
        serde_json::from_value(items).unwrap()
    }

    fn base_config() -> EmbedConfig {
        EmbedConfig::new(CollectionKind::Feed, "alice").unwrap()
    }

    #[test]
    fn test_allow_list_is_order_preserving_subset() {
        let items = parse(json!([
            {"type": "post", "title": "one"},
            {"type": "tip", "user": "u"},
            {"type": "post", "title": "two"},
            {"type": "poll", "title": "p"}
        ]));
        let views = builder(base_config().with_allow_kinds(["post"])).build_page(&items);
        assert_eq!(
            views,
            vec![
                ViewRecord::Post {
                    title: Some("one".into()),
                    description: None,
                    image: None,
                    link: None,
                    locked: false
                },
                ViewRecord::Post {
                    title: Some("two".into()),
                    description: None,
                    image: None,
                    link: None,
                    locked: false
                },
            ]
        );
    }

    #[test]
    fn test_no_allow_list_passes_everything() {
        let items = parse(json!([
            {"type": "post", "title": "one"},
            {"type": "hologram", "x": 1}
        ]));
        let views = builder(base_config()).build_page(&items);
        assert_eq!(views.len(), 2);
        assert_eq!(
            views[1],
            ViewRecord::Raw {
                raw: json!({"type": "hologram", "x": 1})
            }
        );
    }

    #[test]
    fn test_sold_out_products_are_hidden_when_configured() {
        let items = parse(json!([
            {"type": "product", "Title": "A"},
            {"type": "product", "Title": "B", "SoldOut": true}
        ]));

        let shown = builder(base_config()).build_page(&items);
        assert_eq!(shown.len(), 2);

        let hidden =
            builder(base_config().with_sold_out(embed_core::SoldOutMode::Hide)).build_page(&items);
        assert_eq!(hidden.len(), 1);
        assert!(matches!(
            &hidden[0],
            ViewRecord::Product { title: Some(t), .. } if t == "A"
        ));
    }

    #[test]
    fn test_currency_prefixes_price() {
        let items = parse(json!([{"type": "product", "Title": "A", "Price": "3.00"}]));
        let views = builder(base_config().with_currency("$")).build_page(&items);
        assert!(matches!(
            &views[0],
            ViewRecord::Product { price: Some(p), .. } if p == "$3.00"
        ));
    }

    #[test]
    fn test_absent_fields_are_omitted_from_serialization() {
        let items = parse(json!([{"type": "tip", "user": "u", "message": "m"}]));
        let views = builder(base_config()).build_page(&items);
        let value = serde_json::to_value(&views[0]).unwrap();
        assert_eq!(value, json!({"kind": "tip", "user": "u", "message": "m"}));
    }

    #[test]
    fn test_unlocked_post_omits_the_lock_flag() {
        let items = parse(json!([{"type": "post", "title": "t"}]));
        let views = builder(base_config()).build_page(&items);
        let value = serde_json::to_value(&views[0]).unwrap();
        assert_eq!(value, json!({"kind": "post", "title": "t"}));
    }
}
