//! Mock indexer for testing.
//!
//! Provides [`MockIndexer`] for unit tests without file-system access.

use std::collections::HashMap;

use crate::indexer::{IndexError, Indexer, SearchHit};

/// In-memory indexer for tests.
///
/// Files are listed in insertion order. Search results are registered per
/// exact query string.
///
/// # Example
///
/// ```
/// use mdwiki_renderer::{Indexer, MockIndexer};
///
/// let indexer = MockIndexer::new()
///     .with_file("guide.md", "# Guide\n\nContent.")
///     .with_hits("guide", ["guide.md"]);
///
/// let hits = indexer.search("guide").unwrap();
/// assert_eq!(hits[0].reference, "guide.md");
/// ```
#[derive(Debug, Default)]
pub struct MockIndexer {
    files: Vec<String>,
    contents: HashMap<String, String>,
    hits: HashMap<String, Vec<SearchHit>>,
}

impl MockIndexer {
    /// Create a new empty mock indexer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.contents.insert(path.clone(), content.into());
        self.files.push(path);
        self
    }

    /// Register search hits for a query, best match first.
    ///
    /// Scores descend from the number of hits down to 1.
    #[must_use]
    pub fn with_hits<I, S>(mut self, query: impl Into<String>, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let references: Vec<String> = references.into_iter().map(Into::into).collect();
        let count = references.len();
        let hits = references
            .into_iter()
            .enumerate()
            .map(|(i, reference)| {
                #[allow(clippy::cast_precision_loss)]
                let score = (count - i) as f64;
                SearchHit::new(reference, score)
            })
            .collect();
        self.hits.insert(query.into(), hits);
        self
    }
}

impl Indexer for MockIndexer {
    fn search(&self, query: &str) -> Result<Vec<SearchHit>, IndexError> {
        Ok(self.hits.get(query).cloned().unwrap_or_default())
    }

    fn get_content(&self, reference: &str) -> Result<String, IndexError> {
        self.contents
            .get(reference)
            .cloned()
            .ok_or_else(|| IndexError::NotFound(reference.to_owned()))
    }

    fn get_files(&self) -> Result<Vec<String>, IndexError> {
        Ok(self.files.clone())
    }
}
