//! Synonym families keyed by canonical subcategory.

use std::collections::HashMap;

use crate::columns::{resolve_columns, ColumnRole, SYNONYM_FEED_REQUIRED, SYNONYM_FEED_RULES};
use crate::error::TaxonomyError;
use crate::feed::FeedTable;

/// Separators accepted inside the Synonyms cell.
const SYNONYM_SEPARATORS: &[char] = &[',', ';', '|'];

/// One row of the synonym feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymRecord {
    pub cat_code: String,
    pub category: String,
    /// Canonical subcategory every alias in the row resolves to.
    pub sub_category: String,
    pub singular: Option<String>,
    pub synonyms: Vec<String>,
}

impl SynonymRecord {
    /// Canonical name, singular, then synonyms, trimmed and without blanks.
    fn aliases(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.sub_category.as_str())
            .chain(self.singular.as_deref())
            .chain(self.synonyms.iter().map(String::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Singular and synonyms only, without the canonical name.
    fn specific_terms(&self) -> impl Iterator<Item = &str> {
        self.singular
            .as_deref()
            .into_iter()
            .chain(self.synonyms.iter().map(String::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Read-only term → family lookup built from the synonym feed.
#[derive(Debug, Clone, Default)]
pub struct SynonymIndex {
    records: Vec<SynonymRecord>,
    /// Lowercase term → lowercase canonical subcategory.
    term_map: HashMap<String, String>,
    /// Lowercase canonical subcategory → aliases in insertion order. The first
    /// alias is the canonical spelling.
    family_map: HashMap<String, Vec<String>>,
    specific_terms: Vec<String>,
    fallback_categories: Vec<String>,
}

impl SynonymIndex {
    /// An index with no families that still recognizes the fallback labels.
    #[must_use]
    pub fn empty(fallback_categories: &[String]) -> Self {
        Self {
            fallback_categories: clean_labels(fallback_categories),
            ..Self::default()
        }
    }

    /// Builds the index from parsed records.
    ///
    /// Records whose subcategory is a fallback label, or blank, are skipped.
    /// When a term appears in more than one family the first family keeps it.
    #[must_use]
    pub fn build(records: Vec<SynonymRecord>, fallback_categories: &[String]) -> Self {
        let mut index = Self::empty(fallback_categories);

        for record in records {
            let canonical = record.sub_category.trim();
            if canonical.is_empty() {
                tracing::debug!(
                    category = %record.category,
                    "skipping synonym row without subcategory"
                );
                continue;
            }
            if index.is_fallback(canonical) {
                tracing::debug!(sub_category = %canonical, "skipping fallback category row");
                continue;
            }

            let family_key = canonical.to_lowercase();
            let family = index.family_map.entry(family_key.clone()).or_default();
            for alias in record.aliases() {
                let term_key = alias.to_lowercase();
                match index.term_map.get(&term_key) {
                    Some(existing) if *existing != family_key => {
                        // A family only lists terms that resolve back to it.
                        tracing::debug!(
                            term = %alias,
                            kept = %existing,
                            ignored = %family_key,
                            "term already belongs to another family"
                        );
                        continue;
                    }
                    Some(_) => {}
                    None => {
                        index.term_map.insert(term_key, family_key.clone());
                    }
                }
                push_unique(family, alias);
            }
            if family.is_empty() {
                index.family_map.remove(&family_key);
            }
            for term in record.specific_terms() {
                push_unique(&mut index.specific_terms, term);
            }

            index.records.push(record);
        }

        index
    }

    /// Parses the synonym feed and builds the index.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::MissingColumn`] if no subcategory column can
    /// be identified.
    pub fn from_table(
        table: &FeedTable,
        fallback_categories: &[String],
    ) -> Result<Self, TaxonomyError> {
        let columns = resolve_columns(
            "synonym",
            table.headers(),
            SYNONYM_FEED_RULES,
            SYNONYM_FEED_REQUIRED,
        )?;
        let cell = |row: &[String], role: ColumnRole| -> String {
            columns
                .get(role)
                .map(|idx| FeedTable::cell(row, idx).to_owned())
                .unwrap_or_default()
        };

        let records = table
            .rows()
            .iter()
            .map(|row| SynonymRecord {
                cat_code: cell(row, ColumnRole::CatCode),
                category: cell(row, ColumnRole::Category),
                sub_category: cell(row, ColumnRole::SubCategory),
                singular: Some(cell(row, ColumnRole::Singular)).filter(|s| !s.is_empty()),
                synonyms: split_synonyms(&cell(row, ColumnRole::Synonyms)),
            })
            .collect();

        let index = Self::build(records, fallback_categories);
        tracing::info!(
            rows = table.row_count(),
            families = index.family_map.len(),
            terms = index.term_map.len(),
            "loaded synonym feed"
        );
        Ok(index)
    }

    /// Expands `text` to its whole synonym family.
    ///
    /// Fallback labels and unknown terms come back unchanged as a
    /// single-element list.
    #[must_use]
    pub fn expand_term(&self, text: &str) -> Vec<String> {
        if self.is_fallback(text) {
            return vec![text.to_owned()];
        }
        self.term_map
            .get(&text.trim().to_lowercase())
            .and_then(|key| self.family_map.get(key))
            .cloned()
            .unwrap_or_else(|| vec![text.to_owned()])
    }

    /// Canonical subcategory for a known term.
    #[must_use]
    pub fn canonical_name(&self, text: &str) -> Option<&str> {
        self.term_map
            .get(&text.trim().to_lowercase())
            .and_then(|key| self.family_map.get(key))
            .and_then(|family| family.first())
            .map(String::as_str)
    }

    /// Exact, case-insensitive membership in the fallback labels. Surrounding
    /// whitespace is ignored.
    #[must_use]
    pub fn is_fallback(&self, text: &str) -> bool {
        let needle = text.trim().to_lowercase();
        !needle.is_empty()
            && self
                .fallback_categories
                .iter()
                .any(|label| label.to_lowercase() == needle)
    }

    /// Every singular and synonym term, deduplicated, in feed order.
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.specific_terms
    }

    #[must_use]
    pub fn fallback_categories(&self) -> &[String] {
        &self.fallback_categories
    }

    /// Rows accepted into the index.
    #[must_use]
    pub fn records(&self) -> &[SynonymRecord] {
        &self.records
    }

    #[must_use]
    pub fn family_count(&self) -> usize {
        self.family_map.len()
    }
}

fn clean_labels(labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .map(|l| l.trim().to_owned())
        .filter(|l| !l.is_empty())
        .collect()
}

fn split_synonyms(raw: &str) -> Vec<String> {
    raw.split(SYNONYM_SEPARATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Appends `term` unless a case-insensitive equal is already present.
fn push_unique(list: &mut Vec<String>, term: &str) {
    let lower = term.to_lowercase();
    if !list.iter().any(|t| t.to_lowercase() == lower) {
        list.push(term.to_owned());
    }
}
