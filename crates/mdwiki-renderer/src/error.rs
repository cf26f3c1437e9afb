//! Render error types.

use std::path::PathBuf;

use crate::indexer::IndexError;

/// Error returned when a render operation fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Source file not found.
    #[error("Source file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// I/O error reading a source file.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The indexer failed while searching or listing documents.
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl RenderError {
    /// Map an I/O error from reading `path`, keeping "not found" distinct.
    pub(crate) fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path.into())
        } else {
            Self::Io {
                path: path.into(),
                source: err,
            }
        }
    }
}
