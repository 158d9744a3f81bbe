//! Batch collection: the file list a run works through.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::validate_root;
use crate::errors::DateSortError;

/// Regular files directly under `root`, or the whole tree when `recurse` is set.
///
/// Directories and symlinks are not listed and symlinked directories are not entered.
/// Order is stable: sorted by file name within each directory, depth first.
/// An unreadable root fails the collection; an unreadable subdirectory is skipped with a warning.
pub fn collect_files(root: &Path, recurse: bool) -> Result<Vec<PathBuf>, DateSortError> {
    validate_root(root)?;

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    if !recurse {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                // Errors at depth 0 would mean the root itself went away after validation.
                if e.depth() == 0 {
                    return Err(DateSortError::Collect {
                        path: root.to_path_buf(),
                        context: e.to_string(),
                    });
                }
                warn!(path = ?e.path(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    debug!(root = %root.display(), recurse, count = files.len(), "collected files");
    Ok(files)
}
