//! Empty-directory reaping after a run.
//!
//! Repeats full passes (deepest directories first) until a pass removes nothing, so a chain
//! of directories that only contained empty directories disappears completely. The root is
//! never removed, symlinked directories are never entered, and removal failures are skipped.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Remove every empty directory below `root`; returns how many were removed.
pub fn remove_empty_dirs(root: &Path) -> usize {
    let mut removed = 0usize;
    loop {
        let pass = reap_pass(root);
        removed += pass;
        if pass == 0 {
            break;
        }
    }
    debug!(root = %root.display(), removed, "empty-directory reaping done");
    removed
}

fn reap_pass(root: &Path) -> usize {
    let mut dirs: Vec<(usize, PathBuf)> = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir())
        .map(|e| (e.depth(), e.into_path()))
        .collect();
    dirs.sort_by(|a, b| b.0.cmp(&a.0));

    let mut removed = 0;
    for (_, dir) in dirs {
        if !is_empty_dir(&dir) {
            continue;
        }
        match fs::remove_dir(&dir) {
            Ok(()) => {
                trace!(dir = %dir.display(), "removed empty directory");
                removed += 1;
            }
            Err(e) => trace!(dir = %dir.display(), error = %e, "could not remove empty directory"),
        }
    }
    removed
}

fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut it| it.next().is_none())
        .unwrap_or(false)
}
