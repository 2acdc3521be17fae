//! JSON deserialization helpers.

use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

/// Deserializes JSON from bytes.
///
/// Handles both pretty-printed and minified JSON.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Reads and deserializes a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold valid JSON
/// of the expected type.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, SerializationError> {
    let bytes = std::fs::read(path).map_err(|source| SerializationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json_bytes(&bytes)
}
