//! Remote collection client.
//!
//! Fetches one page of a named collection and normalizes the wire shapes the
//! service emits: a bare item array (shop, commissions), a feed object with
//! `feedItems` and a curator avatar, a leaderboard object with `supporters`,
//! or an `{ "error": ... }` body. Errors are normalized, never retried here;
//! retry is driven by the pagination engine's external triggers.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use embed_core::{CollectionKind, OwnerId};

use crate::{FetchError, HttpTransport, ItemRecord};

/// One normalized page of a collection.
///
/// An empty item list is the "no more data" signal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageBody {
    /// Ordered items of this page.
    pub items: Vec<ItemRecord>,
    /// Curator avatar URL, when the endpoint carries one (feed, leaderboard).
    pub curator_avatar: Option<String>,
}

impl PageBody {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Source of collection pages, as consumed by the pagination engine.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Fetch one zero-based page of a collection.
    async fn fetch_page(
        &self,
        collection: CollectionKind,
        owner: &OwnerId,
        page: u32,
    ) -> Result<PageBody, FetchError>;
}

/// Resolves whether an owner is a subscriber.
///
/// Resolution failure is not an error: it defaults to "not a subscriber",
/// which keeps the attribution decoration visible.
#[async_trait]
pub trait SubscriberSource: Send + Sync {
    async fn is_subscriber(&self, owner: &OwnerId) -> bool;
}

/// The raw wire shapes a page endpoint can answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WirePage {
    Error {
        error: serde_json::Value,
    },
    Feed {
        #[serde(rename = "feedItems")]
        feed_items: Vec<serde_json::Value>,
        #[serde(rename = "curatorProfilePic")]
        curator_profile_pic: Option<String>,
    },
    Leaderboard {
        supporters: Vec<serde_json::Value>,
        #[serde(rename = "curatorProfilePic")]
        curator_profile_pic: Option<String>,
    },
    List(Vec<serde_json::Value>),
}

/// HTTP client for the remote collection service.
pub struct CollectionClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl CollectionClient {
    /// Create a client against a service base URL.
    pub fn new(transport: impl HttpTransport + 'static, base_url: impl Into<String>) -> Self {
        Self::with_transport(Arc::new(transport), base_url)
    }

    /// Create a client over a shared transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            transport,
            base_url,
        }
    }

    fn page_url(&self, collection: CollectionKind, owner: &OwnerId, page: u32) -> String {
        format!(
            "{}/{}?pageid={}&page={}",
            self.base_url,
            collection.as_str(),
            owner,
            page
        )
    }

    fn subscriber_url(&self, owner: &OwnerId) -> String {
        format!("{}/subscriber?id={}", self.base_url, owner)
    }
}

#[async_trait]
impl CollectionSource for CollectionClient {
    async fn fetch_page(
        &self,
        collection: CollectionKind,
        owner: &OwnerId,
        page: u32,
    ) -> Result<PageBody, FetchError> {
        let url = self.page_url(collection, owner, page);
        let resp = self.transport.get(&url).await?;
        if !resp.is_success() {
            return Err(FetchError::Http {
                status: resp.status,
                url,
            });
        }

        let wire: WirePage = resp.json()?;
        let body = match wire {
            WirePage::Error { error } => {
                let message = error
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string());
                return Err(FetchError::Service(message));
            }
            WirePage::Feed {
                feed_items,
                curator_profile_pic,
            } => PageBody {
                items: normalize_items(feed_items, None),
                curator_avatar: curator_profile_pic,
            },
            WirePage::Leaderboard {
                supporters,
                curator_profile_pic,
            } => PageBody {
                items: normalize_items(supporters, Some("leaderboard-entry")),
                curator_avatar: curator_profile_pic,
            },
            WirePage::List(items) => PageBody {
                items: normalize_items(items, Some("product")),
                curator_avatar: None,
            },
        };
        tracing::debug!(
            collection = collection.as_str(),
            owner = %owner,
            page,
            items = body.items.len(),
            "fetched page"
        );
        Ok(body)
    }
}

#[async_trait]
impl SubscriberSource for CollectionClient {
    async fn is_subscriber(&self, owner: &OwnerId) -> bool {
        #[derive(Deserialize)]
        struct SubscriberBody {
            #[serde(default)]
            subscriber: bool,
        }

        let url = self.subscriber_url(owner);
        let result: Result<SubscriberBody, FetchError> = async {
            let resp = self.transport.get(&url).await?;
            if !resp.is_success() {
                return Err(FetchError::Http {
                    status: resp.status,
                    url: url.clone(),
                });
            }
            resp.json()
        }
        .await;

        match result {
            Ok(body) => body.subscriber,
            Err(e) => {
                tracing::warn!(owner = %owner, error = %e, "subscriber lookup failed, assuming not subscribed");
                false
            }
        }
    }
}

/// Turn raw wire objects into item records, injecting the collection-implied
/// kind tag where the wire omits it (bare product arrays, supporter rows).
fn normalize_items(values: Vec<serde_json::Value>, implied_kind: Option<&str>) -> Vec<ItemRecord> {
    values
        .into_iter()
        .map(|mut value| {
            if let (Some(kind), Some(obj)) = (implied_kind, value.as_object_mut()) {
                obj.entry("type")
                    .or_insert_with(|| serde_json::Value::String(kind.to_string()));
            }
            serde_json::from_value(value.clone()).unwrap_or(ItemRecord::Raw(value))
        })
        .collect()
}
