use std::sync::Arc;

use crate::codes::CodeCatalog;
use crate::error::TaxonomyError;
use crate::feed::FeedTable;
use crate::synonyms::SynonymIndex;

/// One immutable, fully-built view of both taxonomy feeds.
///
/// The two halves come from independent feeds and are reloaded independently,
/// so each sits behind its own `Arc` and is shared between successive
/// snapshots when only the other half changes.
#[derive(Debug, Clone, Default)]
pub struct TaxonomySnapshot {
    synonyms: Arc<SynonymIndex>,
    codes: Arc<CodeCatalog>,
}

impl TaxonomySnapshot {
    #[must_use]
    pub fn new(synonyms: SynonymIndex, codes: CodeCatalog) -> Self {
        Self {
            synonyms: Arc::new(synonyms),
            codes: Arc::new(codes),
        }
    }

    /// An empty snapshot that only knows the fallback labels.
    #[must_use]
    pub fn empty(fallback_categories: &[String]) -> Self {
        Self::new(SynonymIndex::empty(fallback_categories), CodeCatalog::default())
    }

    /// Builds a snapshot from both feeds at once.
    ///
    /// # Errors
    ///
    /// Returns the first feed's column-resolution error.
    pub fn from_tables(
        synonym_feed: &FeedTable,
        code_feed: &FeedTable,
        fallback_categories: &[String],
    ) -> Result<Self, TaxonomyError> {
        Ok(Self::new(
            SynonymIndex::from_table(synonym_feed, fallback_categories)?,
            CodeCatalog::from_table(code_feed)?,
        ))
    }

    #[must_use]
    pub fn with_synonyms(&self, synonyms: SynonymIndex) -> Self {
        Self {
            synonyms: Arc::new(synonyms),
            codes: Arc::clone(&self.codes),
        }
    }

    #[must_use]
    pub fn with_codes(&self, codes: CodeCatalog) -> Self {
        Self {
            synonyms: Arc::clone(&self.synonyms),
            codes: Arc::new(codes),
        }
    }

    #[must_use]
    pub fn synonyms(&self) -> &SynonymIndex {
        &self.synonyms
    }

    #[must_use]
    pub fn codes(&self) -> &CodeCatalog {
        &self.codes
    }

    /// See [`SynonymIndex::expand_term`].
    #[must_use]
    pub fn expand_term(&self, text: &str) -> Vec<String> {
        self.synonyms.expand_term(text)
    }

    #[must_use]
    pub fn is_fallback(&self, text: &str) -> bool {
        self.synonyms.is_fallback(text)
    }

    #[must_use]
    pub fn canonical_name(&self, text: &str) -> Option<&str> {
        self.synonyms.canonical_name(text)
    }

    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        self.synonyms.vocabulary()
    }

    /// See [`CodeCatalog::find_code`].
    #[must_use]
    pub fn find_code(&self, category: &str, sub_category: &str) -> String {
        self.codes.find_code(category, sub_category)
    }

    #[must_use]
    pub fn list_categories(&self) -> Vec<String> {
        self.codes.list_categories()
    }

    #[must_use]
    pub fn list_subcategories(&self, category: &str) -> Vec<String> {
        self.codes.list_subcategories(category)
    }
}
