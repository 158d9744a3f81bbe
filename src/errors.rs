//! Typed error definitions for date_sort.
//! Run-level failures get a variant here; per-file failures stay as `anyhow` errors
//! and end up in the run report instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DateSortError {
    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Root is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("Cannot read root directory {path}: {context}")]
    RootUnreadable { path: PathBuf, context: String },

    #[error("Failed to list files under {path}: {context}")]
    Collect { path: PathBuf, context: String },

    #[error("Interrupted after {processed} of {total} files")]
    Interrupted { processed: usize, total: usize },
}

impl DateSortError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            DateSortError::RootNotFound(_) => 10,
            DateSortError::RootNotDirectory(_) => 11,
            DateSortError::RootUnreadable { .. } => 12,
            DateSortError::Collect { .. } => 20,
            DateSortError::Interrupted { .. } => 130,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_path() {
        let e = DateSortError::RootNotFound(PathBuf::from("/nope"));
        assert_eq!(e.to_string(), "Root directory not found: /nope");
        assert_eq!(e.code(), 10);
    }

    #[test]
    fn interrupted_reports_progress() {
        let e = DateSortError::Interrupted {
            processed: 3,
            total: 10,
        };
        assert_eq!(e.to_string(), "Interrupted after 3 of 10 files");
    }
}
