use std::collections::BTreeMap;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Product identifier.
///
/// Opaque to the client and compared by its text. The server issues numeric
/// ids, so decoding accepts JSON strings and JSON integers, and encoding
/// writes the id back in whichever form it arrived.
#[derive(Debug, Clone)]
pub struct ProductId {
    text: String,
    numeric: bool,
}

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            text: id.into(),
            numeric: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the id travels as a JSON number.
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
}

impl PartialEq for ProductId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ProductId {}

impl core::hash::Hash for ProductId {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for ProductId {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProductId {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.text.cmp(&other.text)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self {
            text: value.to_string(),
            numeric: true,
        }
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self {
            text: value.to_string(),
            numeric: true,
        }
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.numeric {
            if let Ok(n) = self.text.parse::<u64>() {
                return serializer.serialize_u64(n);
            }
            if let Ok(n) = self.text.parse::<i64>() {
                return serializer.serialize_i64(n);
            }
        }
        serializer.serialize_str(&self.text)
    }
}

struct ProductIdVisitor;

impl<'de> Visitor<'de> for ProductIdVisitor {
    type Value = ProductId;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("a string or integer product id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ProductId::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ProductId::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ProductId::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ProductId::from(v))
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ProductIdVisitor)
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// HAL link object (`{"href": ...}` plus optional attributes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    /// `title`, `templated`, `type`... kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Value under one relation in `_links`: HAL allows a single link or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Links {
    One(Link),
    Many(Vec<Link>),
}

impl Links {
    pub fn first(&self) -> Option<&Link> {
        match self {
            Links::One(link) => Some(link),
            Links::Many(links) => links.first(),
        }
    }
}

/// A product as returned by the server.
///
/// Decoding then re-encoding reproduces the server's JSON: id form,
/// absent versus `null` fields, and unmodelled fields all survive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    description: Option<Option<String>>,
    #[serde(rename = "_links", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    links: Option<BTreeMap<String, Links>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Product {
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref()?.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_ref()?.as_deref()
    }

    /// First link under the given relation, if the server sent one.
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.as_ref()?.get(rel)?.first()
    }

    /// Fields this client does not model.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Partial product payload used for create and update bodies.
///
/// Unset fields are left out of the JSON body entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.description.is_none()
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            name: product.name().map(str::to_owned),
            description: product.description().map(str::to_owned),
        }
    }
}
