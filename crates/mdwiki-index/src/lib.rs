//! File-system document index for mdwiki.
//!
//! [`FsIndexer`] walks a source directory once, keeps every Markdown file in
//! memory and answers the [`Indexer`] queries the renderer makes: full-text
//! search, document content and the list of files.
//!
//! # Scanning
//!
//! Hidden files and directories are skipped and `.gitignore` rules are
//! honored, also outside git repositories. Files are read in parallel.
//!
//! # Search
//!
//! Queries are split into lower-cased alphanumeric terms. A document scores
//! the number of times the terms occur in its content, plus a weighted
//! count of occurrences in its path. Hits are ordered by score, then by
//! reference.

mod scanner;
mod terms;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use mdwiki_renderer::{IndexError, Indexer, SearchHit};
use rayon::prelude::*;

use crate::terms::{term_counts, tokenize};

/// Weight of a query term found in the document path.
const PATH_WEIGHT: usize = 5;

/// A Markdown document held by the index.
#[derive(Debug)]
struct Document {
    /// Path relative to the source directory, with forward slashes.
    reference: String,
    content: String,
    content_terms: HashMap<String, usize>,
    path_terms: HashMap<String, usize>,
}

impl Document {
    fn new(reference: String, content: String) -> Self {
        Self {
            content_terms: term_counts(&content),
            path_terms: term_counts(&reference),
            reference,
            content,
        }
    }

    fn score(&self, terms: &[String]) -> usize {
        terms
            .iter()
            .map(|term| {
                let in_content = self.content_terms.get(term).copied().unwrap_or(0);
                let in_path = self.path_terms.get(term).copied().unwrap_or(0);
                in_content + in_path * PATH_WEIGHT
            })
            .sum()
    }
}

/// In-memory index of the Markdown files below a directory.
#[derive(Debug)]
pub struct FsIndexer {
    source_dir: PathBuf,
    /// Sorted by reference.
    documents: Vec<Document>,
}

impl FsIndexer {
    /// Scan `source_dir` and read all Markdown files.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if the directory or one of its Markdown
    /// files cannot be read.
    pub fn new(source_dir: impl Into<PathBuf>) -> Result<Self, IndexError> {
        let source_dir = source_dir.into();
        let paths = scanner::scan(&source_dir)?;

        let mut documents = paths
            .par_iter()
            .map(|(reference, path)| {
                std::fs::read_to_string(path)
                    .map(|content| Document::new(reference.clone(), content))
                    .map_err(|source| IndexError::Io {
                        path: path.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        documents.sort_by(|a, b| a.reference.cmp(&b.reference));

        tracing::debug!(
            source_dir = %source_dir.display(),
            document_count = documents.len(),
            "Index scan completed"
        );

        Ok(Self {
            source_dir,
            documents,
        })
    }

    /// Index without documents.
    ///
    /// Used when single pages are rendered outside a readable source
    /// directory.
    #[must_use]
    pub fn empty(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            documents: Vec::new(),
        }
    }

    /// Directory the index was built from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn document(&self, reference: &str) -> Option<&Document> {
        self.documents
            .binary_search_by(|doc| doc.reference.as_str().cmp(reference))
            .ok()
            .map(|idx| &self.documents[idx])
    }
}

impl Indexer for FsIndexer {
    fn search(&self, query: &str) -> Result<Vec<SearchHit>, IndexError> {
        let terms: Vec<String> = tokenize(query).collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, &str)> = self
            .documents
            .par_iter()
            .filter_map(|doc| {
                let score = doc.score(&terms);
                (score > 0).then_some((score, doc.reference.as_str()))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        #[allow(clippy::cast_precision_loss)]
        let hits = scored
            .into_iter()
            .map(|(score, reference)| SearchHit::new(reference, score as f64))
            .collect();
        Ok(hits)
    }

    fn get_content(&self, reference: &str) -> Result<String, IndexError> {
        self.document(reference)
            .map(|doc| doc.content.clone())
            .ok_or_else(|| IndexError::NotFound(reference.to_owned()))
    }

    fn get_files(&self) -> Result<Vec<String>, IndexError> {
        Ok(self
            .documents
            .iter()
            .map(|doc| doc.reference.clone())
            .collect())
    }
}
