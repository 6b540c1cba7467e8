//! Load-once, read-many holder for the live taxonomy snapshot.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::codes::CodeCatalog;
use crate::error::TaxonomyError;
use crate::feed::FeedTable;
use crate::snapshot::TaxonomySnapshot;
use crate::synonyms::SynonymIndex;

/// Owns the current [`TaxonomySnapshot`] and replaces it atomically.
///
/// Readers take an `Arc` via [`TaxonomyStore::snapshot`] and keep using it
/// for the whole call, so a concurrent reload never shows them a half-built
/// map. A failed reload logs and leaves the live snapshot untouched.
#[derive(Debug)]
pub struct TaxonomyStore {
    fallback_categories: Vec<String>,
    current: RwLock<Arc<TaxonomySnapshot>>,
}

impl TaxonomyStore {
    /// Starts with an empty snapshot.
    #[must_use]
    pub fn new(fallback_categories: Vec<String>) -> Self {
        let empty = TaxonomySnapshot::empty(&fallback_categories);
        Self {
            fallback_categories,
            current: RwLock::new(Arc::new(empty)),
        }
    }

    /// The live snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TaxonomySnapshot> {
        Arc::clone(&*self.current.read())
    }

    /// Rebuilds the synonym half from `table` and swaps it in.
    ///
    /// # Errors
    ///
    /// Returns the build error; the previous snapshot stays live.
    pub fn reload_synonyms(
        &self,
        table: &FeedTable,
    ) -> Result<Arc<TaxonomySnapshot>, TaxonomyError> {
        let index =
            SynonymIndex::from_table(table, &self.fallback_categories).inspect_err(|e| {
                tracing::error!(error = %e, "rejected synonym feed; keeping previous taxonomy");
            })?;
        Ok(self.swap(|current| current.with_synonyms(index)))
    }

    /// Rebuilds the code half from `table` and swaps it in.
    ///
    /// # Errors
    ///
    /// Returns the build error; the previous snapshot stays live.
    pub fn reload_codes(
        &self,
        table: &FeedTable,
    ) -> Result<Arc<TaxonomySnapshot>, TaxonomyError> {
        let catalog = CodeCatalog::from_table(table).inspect_err(|e| {
            tracing::error!(error = %e, "rejected code feed; keeping previous taxonomy");
        })?;
        Ok(self.swap(|current| current.with_codes(catalog)))
    }

    /// Reads the synonym feed from disk, then behaves like [`Self::reload_synonyms`].
    ///
    /// # Errors
    ///
    /// Returns read, parse, or build errors; the previous snapshot stays live.
    pub fn reload_synonyms_from_path(
        &self,
        path: &Path,
        delimiter: char,
    ) -> Result<Arc<TaxonomySnapshot>, TaxonomyError> {
        let table = FeedTable::from_path(path, delimiter).inspect_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to read synonym feed");
        })?;
        self.reload_synonyms(&table)
    }

    /// Reads the code feed from disk, then behaves like [`Self::reload_codes`].
    ///
    /// # Errors
    ///
    /// Returns read, parse, or build errors; the previous snapshot stays live.
    pub fn reload_codes_from_path(
        &self,
        path: &Path,
        delimiter: char,
    ) -> Result<Arc<TaxonomySnapshot>, TaxonomyError> {
        let table = FeedTable::from_path(path, delimiter).inspect_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to read code feed");
        })?;
        self.reload_codes(&table)
    }

    fn swap<F>(&self, build: F) -> Arc<TaxonomySnapshot>
    where
        F: FnOnce(&TaxonomySnapshot) -> TaxonomySnapshot,
    {
        let mut guard = self.current.write();
        let next = Arc::new(build(&**guard));
        *guard = Arc::clone(&next);
        next
    }
}
