//! `(category, subcategory) → code` catalog used for SKU assembly.

use std::collections::{BTreeMap, HashMap};

use crate::columns::{resolve_columns, ColumnRole, CODE_FEED_REQUIRED, CODE_FEED_RULES};
use crate::error::TaxonomyError;
use crate::feed::FeedTable;

const ARTIFICIAL_PREFIX: &str = "artificial ";

/// Read-only code lookup plus the category/subcategory lists derived from the
/// same feed.
#[derive(Debug, Clone, Default)]
pub struct CodeCatalog {
    /// Lowercase `"category|subcategory"` → code.
    codes: HashMap<String, String>,
    /// Lowercase category → display spelling.
    categories: BTreeMap<String, String>,
    /// Lowercase category → sorted, deduplicated subcategories.
    subcategories: HashMap<String, Vec<String>>,
}

impl CodeCatalog {
    /// Parses the code feed.
    ///
    /// Rows missing any of code, category, or subcategory are skipped. When the
    /// same pair appears twice the first code wins.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::MissingColumn`] if the code, category, or
    /// subcategory column cannot be identified.
    pub fn from_table(table: &FeedTable) -> Result<Self, TaxonomyError> {
        let columns = resolve_columns(
            "code",
            table.headers(),
            CODE_FEED_RULES,
            CODE_FEED_REQUIRED,
        )?;
        let (Some(code_col), Some(category_col), Some(sub_col)) = (
            columns.get(ColumnRole::CatCode),
            columns.get(ColumnRole::Category),
            columns.get(ColumnRole::SubCategory),
        ) else {
            return Err(TaxonomyError::MissingColumn {
                feed: "code",
                role: ColumnRole::CatCode,
            });
        };

        let mut catalog = Self::default();
        for row in table.rows() {
            let code = FeedTable::cell(row, code_col);
            let category = normalize_category(FeedTable::cell(row, category_col));
            let sub_category = FeedTable::cell(row, sub_col);
            if code.is_empty() || category.is_empty() || sub_category.is_empty() {
                tracing::debug!(?row, "skipping incomplete code feed row");
                continue;
            }
            catalog.insert(&category, sub_category, pad_code(code));
        }

        tracing::info!(
            rows = table.row_count(),
            codes = catalog.codes.len(),
            categories = catalog.categories.len(),
            "loaded catalog code feed"
        );
        Ok(catalog)
    }

    fn insert(&mut self, category: &str, sub_category: &str, code: String) {
        let category_key = category.to_lowercase();
        let key = code_key(category, sub_category);
        if let Some(existing) = self.codes.get(&key) {
            if *existing != code {
                tracing::debug!(%key, kept = %existing, ignored = %code, "duplicate catalog code");
            }
        } else {
            self.codes.insert(key, code);
        }

        self.categories
            .entry(category_key.clone())
            .or_insert_with(|| category.to_owned());
        let subs = self.subcategories.entry(category_key).or_default();
        let sub_lower = sub_category.to_lowercase();
        if !subs.iter().any(|s| s.to_lowercase() == sub_lower) {
            subs.push(sub_category.to_owned());
            subs.sort_by_key(|s| s.to_lowercase());
        }
    }

    /// Looks up the code for a pair, ignoring case and surrounding whitespace.
    ///
    /// Returns `""` and logs a warning when the pair is unknown; SKU assembly
    /// then stays incomplete rather than failing.
    #[must_use]
    pub fn find_code(&self, category: &str, sub_category: &str) -> String {
        let key = code_key(&normalize_category(category), sub_category.trim());
        if let Some(code) = self.codes.get(&key) {
            code.clone()
        } else {
            tracing::warn!(%category, %sub_category, "no catalog code for category/subcategory");
            String::new()
        }
    }

    /// Distinct categories, sorted case-insensitively.
    #[must_use]
    pub fn list_categories(&self) -> Vec<String> {
        self.categories.values().cloned().collect()
    }

    /// Subcategories of `category`, sorted; empty for an unknown category.
    #[must_use]
    pub fn list_subcategories(&self, category: &str) -> Vec<String> {
        self.subcategories
            .get(&normalize_category(category).to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn code_key(category: &str, sub_category: &str) -> String {
    format!("{}|{}", category.to_lowercase(), sub_category.to_lowercase())
}

/// Strips a leading `ARTIFICIAL ` and title-cases the rest, so
/// `"ARTIFICIAL PLANTS"`, `"plants"` and `"Plants"` all become `"Plants"`.
fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = if trimmed.len() >= ARTIFICIAL_PREFIX.len()
        && trimmed.is_char_boundary(ARTIFICIAL_PREFIX.len())
        && trimmed[..ARTIFICIAL_PREFIX.len()].eq_ignore_ascii_case(ARTIFICIAL_PREFIX)
    {
        &trimmed[ARTIFICIAL_PREFIX.len()..]
    } else {
        trimmed
    };

    stripped
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Zero-pads all-digit codes to three places; anything else is kept verbatim.
fn pad_code(code: &str) -> String {
    if code.bytes().all(|b| b.is_ascii_digit()) {
        format!("{code:0>3}")
    } else {
        code.to_owned()
    }
}
