//! Document decoding: file bytes to a JSON tree.

use std::path::Path;

use serde_json::Value;

use crate::error::Error;

/// Read and decode one candidate document.
///
/// Object keys keep their order in the file. Callers treat any error as
/// "this document contributes nothing" and move on.
///
/// # Errors
///
/// Returns `Error::ReadFailed` if the file cannot be read,
/// or `Error::JsonDecode` if its content is not a single JSON value.
pub fn parse_document(path: &Path) -> Result<Value, Error> {
    let bytes = std::fs::read(path).map_err(|source| {
        return Error::ReadFailed {
            file: path.to_path_buf(),
            source,
        };
    })?;

    return serde_json::from_slice(&bytes).map_err(|source| {
        return Error::JsonDecode {
            file: path.to_path_buf(),
            source,
        };
    });
}
