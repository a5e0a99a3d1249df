//! Result types for parse output.
//!
//! These mirror the canonical microformats2 JSON shape: a list of items, a
//! `rels` index and a `rel-urls` index. Serializing a [`ParseResult`] with
//! `serde_json` yields that JSON directly.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::Result;

/// Properties of one item: property name to values in document order.
pub type Properties = BTreeMap<String, Vec<PropertyValue>>;

/// One value of a microformat property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Plain string value of a `p-*`, `u-*` or `dt-*` property.
    Text(String),

    /// `u-*` value taken from an `<img>` that carries an `alt` attribute.
    Image {
        /// Resolved image URL.
        value: String,
        /// The image's `alt` text.
        alt: String,
    },

    /// `e-*` value: serialized inner markup plus its rendered text.
    Embedded {
        /// Inner HTML with URLs resolved.
        html: String,
        /// Rendered text of the element.
        value: String,
        /// Language in effect at the element (only with `include_lang`).
        #[serde(skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },

    /// A property-nested microformat.
    Item(Box<Item>),
}

impl PropertyValue {
    /// The plain string form of this value.
    ///
    /// Images yield their URL, embedded markup its text, nested items
    /// their `value` (if any).
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Image { value, .. } | Self::Embedded { value, .. } => Some(value),
            Self::Item(item) => item.value.as_deref(),
        }
    }

    /// The nested item, if this value is one.
    #[must_use]
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A parsed microformat item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Root types (`h-card`, `h-entry`, ...), sorted and deduplicated.
    #[serde(rename = "type")]
    pub types: Vec<String>,

    /// Explicit and implied properties.
    pub properties: Properties,

    /// Nested items that are not property values.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Item>,

    /// Plain value of a property-nested item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Inner HTML of an `e-*` property-nested item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Language of the root element (only with `include_lang`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Item {
    /// Whether the item has the given root type.
    #[must_use]
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }

    /// Values of a property, if present.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&[PropertyValue]> {
        self.properties.get(property).map(Vec::as_slice)
    }

    /// First value of a property as a plain string.
    #[must_use]
    pub fn first_str(&self, property: &str) -> Option<&str> {
        self.get(property)
            .and_then(<[PropertyValue]>::first)
            .and_then(PropertyValue::as_str)
    }
}

/// Attributes recorded for one URL in the `rel-urls` index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelUrl {
    /// Sorted, deduplicated rel tokens pointing at this URL.
    pub rels: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// Text content of the first link seen for this URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A `rel=alternate` link (only with `enable_alternates`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Alternate {
    pub url: String,

    /// Remaining rel tokens joined by a space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Result of parsing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Top-level microformat items in document order.
    pub items: Vec<Item>,

    /// rel token to the resolved URLs that carry it.
    pub rels: BTreeMap<String, Vec<String>>,

    /// Resolved URL to the rels and link attributes seen for it.
    #[serde(rename = "rel-urls")]
    pub rel_urls: BTreeMap<String, RelUrl>,

    /// `rel=alternate` links, when enabled.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<Alternate>,
}

impl ParseResult {
    /// Serializes to compact canonical microformats2 JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes to indented canonical microformats2 JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Converts to a `serde_json::Value`.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
