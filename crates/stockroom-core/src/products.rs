use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One catalog entry, as handed over by the ingestion layer after column
/// normalization.
///
/// The matching engine never mutates these; filtering returns clones and
/// ranking wraps clones in [`ScoredProductItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    pub id: i64,
    /// Stable product code, e.g. `"FL-1042"`.
    pub code: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub description: String,
    /// Category exactly as it appeared in the source export.
    #[serde(default)]
    pub category: String,
    /// Normalized category used for display and for filter/ranker gating.
    #[serde(default)]
    pub display_category: String,
    #[serde(default)]
    pub sub_category: String,
    /// Free-text color description, e.g. `"Dusty Pink/Ivory"`.
    #[serde(default)]
    pub color: String,
    /// Canonical color bucket; empty when nobody has classified the item yet.
    #[serde(default)]
    pub cluster_color: String,
    pub list_price: Decimal,
    /// May dip below zero during transient edits. Only `> 0` counts as in stock.
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub height: Decimal,
    #[serde(default)]
    pub supplier: Option<String>,
}

impl ProductItem {
    /// Returns `true` when at least one unit is on hand.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Output contract of the external vision-analysis service.
///
/// Neither field is guaranteed to use the catalog vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionAnalysisResult {
    /// Best-guess item name, e.g. `"roses"` or `"Other Leaf"`.
    pub simple_name: String,
    /// Best-guess dominant color, e.g. `"dark pink"`.
    pub color: String,
}

/// A [`ProductItem`] carrying the scores the AI ranker computed for it.
///
/// Scores exist only for ordering a single result list and are never written
/// back to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProductItem {
    #[serde(flatten)]
    pub item: ProductItem,
    /// Binary name relevance: `0` or the full name weight.
    pub name_score: u32,
    /// Normalized color similarity, rounded, in `0..=40`.
    pub color_score: u32,
    pub match_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(stock: i64) -> ProductItem {
        ProductItem {
            id: 1,
            code: "FL-1042".to_string(),
            sku: "FL1042-RD".to_string(),
            description: "Red rose stem 24in".to_string(),
            category: "ARTIFICIAL FLOWERS".to_string(),
            display_category: "Floral".to_string(),
            sub_category: "Rose".to_string(),
            color: "Red".to_string(),
            cluster_color: "red".to_string(),
            list_price: Decimal::new(1250, 2),
            stock,
            height: Decimal::new(24, 0),
            supplier: Some("Bloomline".to_string()),
        }
    }

    #[test]
    fn in_stock_requires_positive_count() {
        assert!(make_item(3).is_in_stock());
        assert!(!make_item(0).is_in_stock());
        assert!(!make_item(-2).is_in_stock());
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let json = r#"{
            "id": 7,
            "code": "PL-77",
            "listPrice": "19.99",
            "displayCategory": "Greenery",
            "subCategory": "Succulent"
        }"#;
        let item: ProductItem = serde_json::from_str(json).expect("deserialization failed");
        assert_eq!(item.id, 7);
        assert_eq!(item.list_price, Decimal::new(1999, 2));
        assert_eq!(item.display_category, "Greenery");
        assert_eq!(item.sub_category, "Succulent");
        assert_eq!(item.stock, 0);
        assert!(item.supplier.is_none());
        assert!(item.color.is_empty());
    }

    #[test]
    fn vision_result_uses_camel_case_keys() {
        let json = r#"{"simpleName": "roses", "color": "dusty pink"}"#;
        let analysis: VisionAnalysisResult =
            serde_json::from_str(json).expect("deserialization failed");
        assert_eq!(analysis.simple_name, "roses");
        assert_eq!(analysis.color, "dusty pink");
    }

    #[test]
    fn scored_item_flattens_product_fields() {
        let scored = ScoredProductItem {
            item: make_item(4),
            name_score: 60,
            color_score: 40,
            match_score: 100,
        };
        let value = serde_json::to_value(&scored).expect("serialization failed");
        assert_eq!(value["code"], "FL-1042");
        assert_eq!(value["nameScore"], 60);
        assert_eq!(value["matchScore"], 100);
    }
}
