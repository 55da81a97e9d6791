use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::product::{Product, present};

/// Page requested when the caller does not say otherwise.
pub const DEFAULT_PAGE: u32 = 0;
/// Page size requested when the caller does not say otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Page coordinates forwarded verbatim as `page` / `pageSize` query parameters.
///
/// Zero-based. Out-of-range pages are the server's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Same page size, given page.
    pub fn page(self, page: u32) -> Self {
        Self { page, ..self }
    }

    /// Query parameters in the order the server expects them.
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<(u32, u32)> for PageRequest {
    fn from((page, page_size): (u32, u32)) -> Self {
        Self::new(page, page_size)
    }
}

/// Paginated envelope around a list of products.
///
/// Like [`Product`], re-encoding reproduces what the server sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    products: Option<Option<Vec<Product>>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    total_elements: Option<Option<u64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    total_pages: Option<Option<u32>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ProductPage {
    pub fn products(&self) -> &[Product] {
        self.products
            .as_ref()
            .and_then(|p| p.as_deref())
            .unwrap_or_default()
    }

    pub fn total_elements(&self) -> Option<u64> {
        self.total_elements.flatten()
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages.flatten()
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn is_empty(&self) -> bool {
        self.products().is_empty()
    }
}
