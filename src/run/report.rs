//! Per-file outcomes and the end-of-run summary.

use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Moved { dest: PathBuf },
    /// Dry run: where the file would have gone.
    WouldMove { dest: PathBuf },
    SkippedNotFound,
    SkippedAlreadyInPlace,
    SkippedNoFreeName,
    /// The file was left at its original path.
    Errored(String),
}

impl FileOutcome {
    /// Stable label for structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            FileOutcome::Moved { .. } => "MOVED",
            FileOutcome::WouldMove { .. } => "WOULD_MOVE",
            FileOutcome::SkippedNotFound => "SKIPPED_NOT_FOUND",
            FileOutcome::SkippedAlreadyInPlace => "SKIPPED_ALREADY_IN_PLACE",
            FileOutcome::SkippedNoFreeName => "SKIPPED_NO_FREE_NAME",
            FileOutcome::Errored(_) => "ERRORED",
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            FileOutcome::SkippedNotFound | FileOutcome::SkippedAlreadyInPlace | FileOutcome::SkippedNoFreeName
        )
    }

    /// The line shown to the user for `src`; destinations are shown relative to `root`.
    pub fn log_line(&self, src: &Path, root: &Path) -> String {
        let name = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| src.display().to_string());
        let rel = |dest: &Path| dest.strip_prefix(root).unwrap_or(dest).display().to_string();
        match self {
            FileOutcome::Moved { dest } => format!("Moved: {name} -> {}", rel(dest)),
            FileOutcome::WouldMove { dest } => format!("Would move: {name} -> {}", rel(dest)),
            FileOutcome::SkippedNotFound => format!("Skipped (file not found): {name}"),
            FileOutcome::SkippedAlreadyInPlace => format!("Skipped (already in place): {name}"),
            FileOutcome::SkippedNoFreeName => format!("Skipped (no free name found): {name}"),
            FileOutcome::Errored(msg) => format!("Error (file left in place): {name}: {msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub src: PathBuf,
    pub outcome: FileOutcome,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    pub total: usize,
    pub records: Vec<FileRecord>,
    pub removed_dirs: usize,
    pub dry_run: bool,
}

impl RunReport {
    pub fn new(total: usize, dry_run: bool) -> Self {
        Self {
            total,
            records: Vec::with_capacity(total),
            removed_dirs: 0,
            dry_run,
        }
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn moved(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Moved { .. }))
    }

    pub fn would_move(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::WouldMove { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(FileOutcome::is_skip)
    }

    pub fn errors(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Errored(_)))
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            write!(f, "Dry run: would move {} of {}", self.would_move(), self.total)?;
        } else {
            write!(f, "Done: moved {} of {}", self.moved(), self.total)?;
        }
        let errors = self.errors();
        if errors > 0 {
            write!(f, ", errors: {errors}")?;
        }
        let skipped = self.skipped();
        if skipped > 0 {
            write!(f, ", skipped: {skipped}")?;
        }
        if self.removed_dirs > 0 {
            write!(f, ", removed empty folders: {}", self.removed_dirs)?;
        }
        if errors > 0 {
            write!(f, ". Errored files were left in place.")?;
        }
        Ok(())
    }
}
