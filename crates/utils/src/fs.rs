//! File-system helpers used by probes and remediation steps.
//!
//! All helpers are synchronous: each call either succeeds or returns an
//! `Error::FileSystem` naming the path and the operation.

use envdoctor_core::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn path_exists(path: &Path) -> bool {
    path.exists()
}

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::file_system(path, "read", e))
}

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::Json {
        message: format!("failed to parse '{}': {e}", path.display()),
        source: e,
    })
}

/// Write a file, creating parent directories as needed
pub fn write_string(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::file_system(parent, "create directory", e))?;
    }
    fs::write(path, content).map_err(|e| Error::file_system(path, "write", e))
}

/// Remove a file or a directory tree.
///
/// Returns `Ok(false)` when there was nothing to remove.
pub fn remove_path(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(Error::file_system(path, "stat", e)),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| Error::file_system(path, "remove", e))?;
    Ok(true)
}

/// Names of the entries in a directory, sorted so callers see a stable order
pub fn list_dir_sorted(path: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(path).map_err(|e| Error::file_system(path, "read directory", e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::file_system(path, "read directory entry", e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}
