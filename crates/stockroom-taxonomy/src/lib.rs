//! Taxonomy resolution for the Stockroom catalog.
//!
//! Two tabular feeds are loaded into immutable lookup structures: a
//! synonym/subcategory feed that groups interchangeable search terms into
//! families, and a catalog-code feed that maps `(category, subcategory)` to a
//! short numeric code. Readers hold an `Arc<TaxonomySnapshot>`; reloads build a
//! new snapshot and swap it in whole via [`TaxonomyStore`].

pub mod codes;
pub mod columns;
pub mod error;
pub mod feed;
pub mod snapshot;
pub mod store;
pub mod synonyms;

pub use codes::CodeCatalog;
pub use columns::ColumnRole;
pub use error::TaxonomyError;
pub use feed::FeedTable;
pub use snapshot::TaxonomySnapshot;
pub use store::TaxonomyStore;
pub use synonyms::{SynonymIndex, SynonymRecord};
