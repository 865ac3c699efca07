//! # Document Loading
//!
//! Reads a JSON document fully into memory before parsing. The file handle
//! is dropped as soon as the read completes, so it is released whether or
//! not the contents parse.

use std::path::Path;

use serde_json::Value;

use crate::error::DocumentError;

/// Load and parse the JSON document at `path`.
///
/// # Errors
///
/// Returns [`DocumentError::Io`] if the file cannot be read and
/// [`DocumentError::Parse`] if its contents are not valid JSON.
pub fn load_json(path: impl AsRef<Path>) -> Result<Value, DocumentError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value = serde_json::from_str(&content).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded JSON document");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_valid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, br#"{"type": "FeatureCollection", "features": []}"#).unwrap();

        let value = load_json(&path).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = load_json(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }), "got: {err}");
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{\"type\": ").unwrap();

        let err = load_json(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }), "got: {err}");
        assert!(err.to_string().contains("broken.json"));
    }
}
