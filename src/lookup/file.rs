//! Reading code-to-label JSON files

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::errors::{DirectoryError, DirectoryResult};

/// Load a `{"code": "Label", ...}` file.
///
/// Entries come back in key order.
pub fn load_label_map(path: &Path) -> DirectoryResult<Vec<(String, String)>> {
    let content = fs::read_to_string(path).map_err(|source| DirectoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| DirectoryError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Object(entries) = value else {
        return Err(DirectoryError::NotAnObject {
            path: path.to_path_buf(),
        });
    };

    entries
        .into_iter()
        .map(|(code, label)| match label {
            Value::String(label) => Ok((code, label)),
            _ => Err(DirectoryError::InvalidLabel {
                path: path.to_path_buf(),
                code,
            }),
        })
        .collect()
}
