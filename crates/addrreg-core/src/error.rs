//! # Error Types
//!
//! Errors raised while bringing a document into memory. Both variants are
//! fatal for a run: nothing is validated until the document parsed cleanly.

use std::path::PathBuf;

use thiserror::Error;

/// A JSON document could not be loaded.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be opened or read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not well-formed JSON.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        /// Path of the malformed document.
        path: PathBuf,
        /// Parser error, carrying line and column.
        #[source]
        source: serde_json::Error,
    },
}

impl DocumentError {
    /// Path of the document that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
