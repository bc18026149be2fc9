//! Filesystem helpers for verdict.

use std::path::Path;

use crate::error::UtilError;

/// Read a file's raw bytes.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, UtilError> {
    std::fs::read(path).map_err(|source| UtilError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Remove a directory tree if it exists.
///
/// Missing directories are not an error; there is nothing to remove.
///
/// # Errors
/// Returns an error if an existing tree cannot be removed.
pub fn remove_tree(path: &Path) -> Result<(), UtilError> {
    if !path.exists() {
        return Ok(());
    }
    std::fs::remove_dir_all(path).map_err(|source| UtilError::Io {
        path: path.display().to_string(),
        source,
    })
}
