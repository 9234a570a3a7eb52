//! Per-instance embed configuration.
//!
//! Each mount point on the host page carries a set of attributes describing
//! which collection to render and how. Configuration is read once when the
//! instance initializes; a missing owner id is a hard error, everything else
//! degrades to a sensible default.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{CollectionKind, ConfigError, OwnerId};

/// Stylesheet theme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Full default stylesheet.
    #[default]
    Default,
    /// Low-profile stylesheet.
    Low,
    /// No stylesheet at all.
    None,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Low => "low",
            Theme::None => "none",
        }
    }

    /// Parse a theme attribute, falling back to the default theme with a
    /// warning for unrecognized values.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("default") | None => Theme::Default,
            Some("low") => Theme::Low,
            Some("none") => Theme::None,
            Some(other) => {
                tracing::warn!(theme = other, "unrecognized theme, using default");
                Theme::Default
            }
        }
    }
}

/// Whether sold-out items are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoldOutMode {
    /// Render sold-out items alongside available ones.
    #[default]
    Show,
    /// Drop sold-out items from the rendered sequence.
    Hide,
}

impl SoldOutMode {
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("hide") => SoldOutMode::Hide,
            _ => SoldOutMode::Show,
        }
    }
}

/// Configuration for one embed instance.
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// The collection this instance renders.
    pub collection: CollectionKind,
    /// Owner of the collection. Required.
    pub owner: OwnerId,
    /// Stylesheet theme.
    pub theme: Theme,
    /// Display name shown in the embed header.
    pub display_name: Option<String>,
    /// Allowed item kinds (lowercase). `None` means all kinds pass.
    pub allow_kinds: Option<HashSet<String>>,
    /// Whether sold-out products are rendered.
    pub sold_out: SoldOutMode,
    /// Currency symbol prefixed to product prices.
    pub currency: Option<String>,
}

impl EmbedConfig {
    /// Create a configuration with defaults for all optional attributes.
    pub fn new(collection: CollectionKind, owner: impl Into<OwnerId>) -> Result<Self, ConfigError> {
        let owner = owner.into();
        if owner.is_empty() {
            return Err(ConfigError::MissingAttribute("id"));
        }
        Ok(Self {
            collection,
            owner,
            theme: Theme::default(),
            display_name: None,
            allow_kinds: None,
            sold_out: SoldOutMode::default(),
            currency: None,
        })
    }

    /// Read configuration from a host-page attribute map.
    ///
    /// Recognized keys: `id` (required), `theme`, `name`, `items`
    /// (comma-separated kind allow-list), `soldout`, `currency`.
    pub fn from_attributes(
        collection: CollectionKind,
        attrs: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let owner = attrs
            .get("id")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingAttribute("id"))?;

        let mut config = Self::new(collection, owner.as_str())?;
        config.theme = Theme::parse_or_default(attrs.get("theme").map(String::as_str));
        config.sold_out = SoldOutMode::parse_or_default(attrs.get("soldout").map(String::as_str));
        config.display_name = attrs.get("name").cloned();
        config.currency = attrs.get("currency").cloned();
        if let Some(items) = attrs.get("items") {
            config.allow_kinds = parse_allow_list(items);
        }
        Ok(config)
    }

    /// Set the stylesheet theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Restrict rendering to the given item kinds.
    pub fn with_allow_kinds<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_kinds = Some(
            kinds
                .into_iter()
                .map(|k| k.into().trim().to_lowercase())
                .collect(),
        );
        self
    }

    /// Set sold-out handling.
    pub fn with_sold_out(mut self, mode: SoldOutMode) -> Self {
        self.sold_out = mode;
        self
    }

    /// Set the currency symbol for product prices.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Check whether an item kind passes the allow-list.
    pub fn kind_allowed(&self, kind: &str) -> bool {
        match &self.allow_kinds {
            Some(allowed) => allowed.contains(&kind.to_lowercase()),
            None => true,
        }
    }
}

/// Parse a comma-separated allow-list; blank input means "no filter".
fn parse_allow_list(raw: &str) -> Option<HashSet<String>> {
    let kinds: HashSet<String> = raw
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    if kinds.is_empty() {
        None
    } else {
        Some(kinds)
    }
}
