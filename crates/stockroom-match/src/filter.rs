//! Structured product filtering driven by the search panel.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockroom_core::ProductItem;

use crate::keywords::KeywordQuery;

/// Supplier or category value meaning "no restriction".
pub const UNRESTRICTED: &str = "All";

/// Inclusive numeric range. A missing bound is unrestricted; it is never
/// read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl ValueRange {
    #[must_use]
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self { min, max }
    }

    /// `min > max` is accepted and simply contains nothing.
    #[must_use]
    pub fn contains(&self, value: Decimal) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Every predicate the search panel can set. Absent or blank fields are
/// inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    /// Boolean keyword expression, see [`KeywordQuery`].
    pub keywords: Option<String>,
    pub price: ValueRange,
    pub height: ValueRange,
    /// Allowed suppliers. `None`, an empty list, or a list containing
    /// [`UNRESTRICTED`] disables the predicate.
    pub suppliers: Option<Vec<String>>,
    /// Required display category, compared exactly.
    pub category: Option<String>,
    pub sub_categories: Vec<String>,
    pub in_stock_only: bool,
}

impl FilterSpec {
    /// Compiles the spec once so it can be checked against many items.
    #[must_use]
    pub fn compile(&self) -> CompiledFilter<'_> {
        let suppliers = self.suppliers.as_deref().filter(|list| {
            !list.is_empty()
                && !list
                    .iter()
                    .any(|s| s.trim().eq_ignore_ascii_case(UNRESTRICTED))
        });
        let category = self
            .category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != UNRESTRICTED);
        let sub_categories: Vec<&str> = self
            .sub_categories
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        let keywords = self.keywords.as_deref().and_then(KeywordQuery::parse);

        CompiledFilter {
            spec: self,
            suppliers,
            category,
            sub_categories,
            keywords,
        }
    }

    /// Whether a single item passes every active predicate.
    #[must_use]
    pub fn matches(&self, item: &ProductItem) -> bool {
        self.compile().matches(item)
    }
}

/// A [`FilterSpec`] with its inactive predicates resolved and its keyword
/// expression parsed.
#[derive(Debug)]
pub struct CompiledFilter<'a> {
    spec: &'a FilterSpec,
    suppliers: Option<&'a [String]>,
    category: Option<&'a str>,
    sub_categories: Vec<&'a str>,
    keywords: Option<KeywordQuery>,
}

impl CompiledFilter<'_> {
    #[must_use]
    pub fn matches(&self, item: &ProductItem) -> bool {
        if self.spec.in_stock_only && !item.is_in_stock() {
            return false;
        }
        if !self.spec.price.contains(item.list_price) {
            return false;
        }
        if !self.spec.height.contains(item.height) {
            return false;
        }
        if let Some(allowed) = self.suppliers {
            let Some(supplier) = item.supplier.as_deref() else {
                return false;
            };
            if !allowed.iter().any(|s| s == supplier) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if item.display_category != category {
                return false;
            }
        }
        if !self.sub_categories.is_empty()
            && !self.sub_categories.contains(&item.sub_category.as_str())
        {
            return false;
        }
        self.keywords.as_ref().map_or(true, |query| query.matches(item))
    }
}

/// Returns the items that satisfy every active predicate of `spec`, in their
/// original order.
#[must_use]
pub fn filter_products(items: &[ProductItem], spec: &FilterSpec) -> Vec<ProductItem> {
    let compiled = spec.compile();
    let kept: Vec<ProductItem> = items
        .iter()
        .filter(|item| compiled.matches(item))
        .cloned()
        .collect();
    tracing::debug!(
        total = items.len(),
        kept = kept.len(),
        "filtered products"
    );
    kept
}
