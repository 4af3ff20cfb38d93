use crate::core::error::AutoloadError;
use std::fs;
use std::path::{Path, PathBuf};

/// Lists the regular files directly inside `directory`, sorted by name.
///
/// Subdirectories are not descended into and are not returned. A path that is not an existing
/// directory is `DirectoryNotFound`, never an empty list.
pub fn list_files(directory: &Path) -> Result<Vec<PathBuf>, AutoloadError> {
    if !directory.is_dir() {
        return Err(AutoloadError::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_dir() {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// True when `path` ends in `extension`. A leading `.` on `extension` is ignored.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let extension = extension.trim_start_matches('.');
    path.extension().is_some_and(|e| e == extension)
}
