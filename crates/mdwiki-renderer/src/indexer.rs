//! Indexer trait consumed by the renderer.
//!
//! The renderer never walks the file system or ranks documents itself. Search
//! hits, document contents and the list of files come from an [`Indexer`].
//!
//! # Reference Convention
//!
//! References are relative paths with forward slashes, as they should appear
//! in links (e.g. `"guide.md"`, `"domain/billing.md"`).

use std::path::PathBuf;

/// A single ranked search hit.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
    /// Document reference (relative path).
    pub reference: String,
    /// Relevance score, higher is better.
    pub score: f64,
}

impl SearchHit {
    /// Create a new search hit.
    #[must_use]
    pub fn new(reference: impl Into<String>, score: f64) -> Self {
        Self {
            reference: reference.into(),
            score,
        }
    }
}

/// Error returned by [`Indexer`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// No document with this reference.
    #[error("Document not found: {0}")]
    NotFound(String),
    /// I/O error while reading the index source.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Backend-specific failure.
    #[error("Index error: {0}")]
    Other(String),
}

/// Document index backing search and the site index.
///
/// Implementations must return search hits already ordered by relevance.
pub trait Indexer: Send + Sync {
    /// Search documents, most relevant first.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the backend cannot answer the query.
    fn search(&self, query: &str) -> Result<Vec<SearchHit>, IndexError>;

    /// Full Markdown content of a document.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::NotFound`] for unknown references.
    fn get_content(&self, reference: &str) -> Result<String, IndexError>;

    /// All indexed file paths.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the file list cannot be produced.
    fn get_files(&self) -> Result<Vec<String>, IndexError>;
}
