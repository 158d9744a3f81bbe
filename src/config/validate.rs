//! Root validation.
//! A run only starts once the root exists, is a directory and can be listed; anything
//! else is a run-level failure rather than a per-file one.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, error};

use crate::errors::DateSortError;

use super::types::PolicyConfig;

impl PolicyConfig {
    /// Validate that the root can be organized.
    pub fn validate(&self) -> Result<(), DateSortError> {
        validate_root(&self.root)
    }
}

/// Ensure `root` exists, is a directory and is readable.
pub fn validate_root(root: &Path) -> Result<(), DateSortError> {
    let meta = match fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            error!(root = %root.display(), "root does not exist");
            return Err(DateSortError::RootNotFound(root.to_path_buf()));
        }
        Err(e) => {
            return Err(DateSortError::RootUnreadable {
                path: root.to_path_buf(),
                context: e.to_string(),
            });
        }
    };
    if !meta.is_dir() {
        error!(root = %root.display(), "root is not a directory");
        return Err(DateSortError::RootNotDirectory(root.to_path_buf()));
    }

    fs::read_dir(root).map_err(|e| DateSortError::RootUnreadable {
        path: root.to_path_buf(),
        context: e.to_string(),
    })?;
    debug!("root readable: {}", root.display());
    Ok(())
}
