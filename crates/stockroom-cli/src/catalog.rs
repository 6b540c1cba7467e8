//! Product filtering, ranking and color commands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use stockroom_core::{AppConfig, ProductItem, VisionAnalysisResult};
use stockroom_match::{filter_products, rank_matches, FilterSpec, ValueRange};

use crate::taxonomy::load_taxonomy;

/// Search-panel criteria. Flags override the matching fields of `--spec`.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// JSON filter spec to start from
    #[arg(long)]
    pub spec: Option<PathBuf>,
    /// Keyword expression, e.g. "red rose OR peony -small"
    #[arg(long)]
    pub keywords: Option<String>,
    #[arg(long)]
    pub min_price: Option<Decimal>,
    #[arg(long)]
    pub max_price: Option<Decimal>,
    #[arg(long)]
    pub min_height: Option<Decimal>,
    #[arg(long)]
    pub max_height: Option<Decimal>,
    /// Allowed supplier; repeat for several, or pass "All"
    #[arg(long = "supplier")]
    pub suppliers: Vec<String>,
    /// Display category, compared exactly
    #[arg(long)]
    pub category: Option<String>,
    /// Allowed subcategory; repeat for several
    #[arg(long = "sub-category")]
    pub sub_categories: Vec<String>,
    /// Only items with stock above zero
    #[arg(long)]
    pub in_stock: bool,
}

impl FilterArgs {
    /// Merges the flags over the optional spec file.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec file cannot be read or parsed.
    pub fn to_spec(&self) -> anyhow::Result<FilterSpec> {
        let mut spec = match &self.spec {
            Some(path) => read_json::<FilterSpec>(path)?,
            None => FilterSpec::default(),
        };
        if let Some(keywords) = &self.keywords {
            spec.keywords = Some(keywords.clone());
        }
        override_range(&mut spec.price, self.min_price, self.max_price);
        override_range(&mut spec.height, self.min_height, self.max_height);
        if !self.suppliers.is_empty() {
            spec.suppliers = Some(self.suppliers.clone());
        }
        if let Some(category) = &self.category {
            spec.category = Some(category.clone());
        }
        if !self.sub_categories.is_empty() {
            spec.sub_categories.clone_from(&self.sub_categories);
        }
        spec.in_stock_only |= self.in_stock;
        Ok(spec)
    }
}

fn override_range(range: &mut ValueRange, min: Option<Decimal>, max: Option<Decimal>) {
    if min.is_some() {
        range.min = min;
    }
    if max.is_some() {
        range.max = max;
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

pub(crate) fn read_products(path: &Path) -> anyhow::Result<Vec<ProductItem>> {
    let products: Vec<ProductItem> = read_json(path)?;
    tracing::info!(path = %path.display(), count = products.len(), "loaded products");
    Ok(products)
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn run_filter(products: &Path, args: &FilterArgs) -> anyhow::Result<()> {
    let spec = args.to_spec()?;
    let items = read_products(products)?;
    print_json(&filter_products(&items, &spec))
}

pub(crate) fn run_rank(
    config: &AppConfig,
    products: &Path,
    name: &str,
    color: &str,
) -> anyhow::Result<()> {
    let (snapshot, settings) = load_taxonomy(config)?;
    let items = read_products(products)?;
    let analysis = VisionAnalysisResult {
        simple_name: name.to_string(),
        color: color.to_string(),
    };
    print_json(&rank_matches(&items, &analysis, &snapshot, &settings))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClusterSuggestion<'a> {
    color: &'a str,
    /// Empty when the color needs manual classification.
    cluster_color: &'static str,
}

pub(crate) fn run_cluster(colors: &[String]) -> anyhow::Result<()> {
    let suggestions: Vec<ClusterSuggestion<'_>> = colors
        .iter()
        .map(|color| ClusterSuggestion {
            color,
            cluster_color: stockroom_match::closest_cluster_color(color),
        })
        .collect();
    print_json(&suggestions)
}
