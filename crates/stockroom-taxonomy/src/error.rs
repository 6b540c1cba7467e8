use thiserror::Error;

use crate::columns::ColumnRole;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("failed to read feed {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("feed has no header row")]
    EmptyFeed,

    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("{feed} feed has no column for required role '{role}'")]
    MissingColumn {
        feed: &'static str,
        role: ColumnRole,
    },
}
