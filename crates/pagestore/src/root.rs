//! Page directory validation, run once when a store is opened.

use crate::error::{Result, StoreError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Make sure `path` is a usable page directory.
///
/// - Missing: created along with its parents.
/// - Existing directory: accepted untouched.
/// - Anything else (a plain file, a dangling entry): [`StoreError::Configuration`].
pub fn ensure_root(path: &Path) -> Result<PathBuf> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(path.to_path_buf()),
        Ok(_) => Err(StoreError::Configuration(format!(
            "Page directory {} exists but is not a directory",
            path.display()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            fs::create_dir_all(path)?;
            info!(dir = %path.display(), "Created page directory");
            Ok(path.to_path_buf())
        }
        Err(e) => Err(StoreError::Io(e)),
    }
}
