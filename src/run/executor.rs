//! Batch move executor.
//!
//! Files are processed strictly in order, one at a time. Per-file problems become outcomes
//! in the report and never stop the batch; only run-level failures (root unusable,
//! shutdown requested) end a run early. Either way exactly one terminal event is emitted.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::PolicyConfig;
use crate::errors::DateSortError;
use crate::fs_ops::{
    MoveFileError, MoveMethod, NameResolution, classification_time, ensure_target_dir, io_error_with_help,
    io_error_with_help_io, move_file, path_occupied, plan_target_dir, remove_empty_dirs, resolve_free_name,
    resolve_free_name_avoiding,
};
use crate::shutdown::ShutdownFlag;

use super::events::{EventSink, RunEvent};
use super::report::{FileOutcome, FileRecord, RunReport};

/// How often a file's name is re-resolved after its chosen destination was taken
/// between the check and the move.
const RESOLVE_ROUNDS: usize = 3;

/// Move `files` into date folders under `policy.root`, reporting through `sink`.
/// The run cannot be interrupted; see [`run_move_until`].
pub fn run_move<S>(policy: &PolicyConfig, files: &[PathBuf], sink: &mut S) -> Result<RunReport, DateSortError>
where
    S: EventSink + ?Sized,
{
    run_move_until(policy, files, &ShutdownFlag::new(), sink)
}

/// Like [`run_move`], but stops before the next file once `shutdown` is requested.
pub fn run_move_until<S>(
    policy: &PolicyConfig,
    files: &[PathBuf],
    shutdown: &ShutdownFlag,
    sink: &mut S,
) -> Result<RunReport, DateSortError>
where
    S: EventSink + ?Sized,
{
    let result = execute(policy, files, shutdown, sink);
    match &result {
        Ok(report) => {
            info!(
                total = report.total,
                moved = report.moved(),
                skipped = report.skipped(),
                errors = report.errors(),
                removed_dirs = report.removed_dirs,
                "run finished"
            );
            sink.emit(RunEvent::Finished(report.clone()));
        }
        Err(e) => {
            error!(code = e.code(), error = %e, "run failed");
            sink.emit(RunEvent::Failed(e.to_string()));
        }
    }
    result
}

fn execute<S>(
    policy: &PolicyConfig,
    files: &[PathBuf],
    shutdown: &ShutdownFlag,
    sink: &mut S,
) -> Result<RunReport, DateSortError>
where
    S: EventSink + ?Sized,
{
    policy.validate()?;

    let total = files.len();
    info!(root = %policy.root.display(), total, dry_run = policy.dry_run, "starting run");
    let mut report = RunReport::new(total, policy.dry_run);
    // Dry-run destinations handed out so far; nothing lands on disk to mark them taken.
    let mut claimed = HashSet::new();

    for (idx, src) in files.iter().enumerate() {
        if shutdown.is_requested() {
            warn!(processed = idx, total, "shutdown requested; stopping before next file");
            return Err(DateSortError::Interrupted { processed: idx, total });
        }
        sink.emit(RunEvent::Progress {
            current: idx + 1,
            total,
        });

        let outcome = process_file(policy, src, &mut claimed);
        debug!(src = %src.display(), outcome = outcome.label(), "file processed");
        sink.emit(RunEvent::Log(outcome.log_line(src, &policy.root)));
        report.records.push(FileRecord {
            src: src.clone(),
            outcome,
        });
    }

    if policy.delete_empty_dirs && !policy.dry_run {
        report.removed_dirs = remove_empty_dirs(&policy.root);
        if report.removed_dirs > 0 {
            sink.emit(RunEvent::Log(format!("Removed empty folders: {}", report.removed_dirs)));
        }
    }
    Ok(report)
}

/// Classify, plan and move one file. Never panics on filesystem state; every failure
/// maps to an outcome and leaves the source where it was.
fn process_file(policy: &PolicyConfig, src: &Path, claimed: &mut HashSet<PathBuf>) -> FileOutcome {
    // The batch list is a snapshot; re-check the file now.
    let meta = match fs::symlink_metadata(src) {
        Ok(m) if m.is_file() => m,
        Ok(_) => return FileOutcome::SkippedNotFound,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return FileOutcome::SkippedNotFound,
        Err(e) => return errored(io_error_with_help("read file info", src)(e)),
    };

    let when = match classification_time(&meta, policy.prefer_creation_time) {
        Ok(t) => t,
        Err(e) => return errored(io_error_with_help("read file timestamps", src)(e)),
    };
    let dir = plan_target_dir(policy, src, &when, meta.len());

    if policy.dry_run {
        let resolved = resolve_free_name_avoiding(&dir, src, claimed).map_err(|e| check_failed(&dir, e));
        return match resolved {
            Ok(NameResolution::Free(dest)) => {
                claimed.insert(dest.clone());
                FileOutcome::WouldMove { dest }
            }
            Ok(NameResolution::SameFile) => FileOutcome::SkippedAlreadyInPlace,
            Ok(NameResolution::Exhausted) => FileOutcome::SkippedNoFreeName,
            Err(outcome) => outcome,
        };
    }

    if let Err(e) = ensure_target_dir(&dir) {
        return errored(e);
    }
    move_with_retries(&dir, src, move_file)
}

/// Resolve a free name and hand it to `mover`; when the name is taken before the move
/// lands, resolve again, up to `RESOLVE_ROUNDS` times.
fn move_with_retries<M>(dir: &Path, src: &Path, mut mover: M) -> FileOutcome
where
    M: FnMut(&Path, &Path) -> Result<MoveMethod, MoveFileError>,
{
    for round in 0..RESOLVE_ROUNDS {
        let dest = match resolve_free_name(dir, src).map_err(|e| check_failed(dir, e)) {
            Ok(NameResolution::Free(dest)) => dest,
            Ok(NameResolution::SameFile) => return FileOutcome::SkippedAlreadyInPlace,
            Ok(NameResolution::Exhausted) => return FileOutcome::SkippedNoFreeName,
            Err(outcome) => return outcome,
        };
        match mover(src, &dest) {
            Ok(method) => {
                debug!(src = %src.display(), dest = %dest.display(), ?method, "moved");
                return FileOutcome::Moved { dest };
            }
            Err(MoveFileError::DestinationTaken(taken)) => {
                debug!(dest = %taken.display(), round, "destination taken before move; resolving again");
            }
            Err(MoveFileError::Failed(e)) => {
                if matches!(path_occupied(src), Ok(false)) {
                    return FileOutcome::SkippedNotFound;
                }
                return errored(e);
            }
        }
    }
    warn!(src = %src.display(), "destination kept getting taken; skipping");
    FileOutcome::SkippedNoFreeName
}

fn check_failed(dir: &Path, e: io::Error) -> FileOutcome {
    FileOutcome::Errored(io_error_with_help_io("check destination", dir)(e).to_string())
}

fn errored(e: anyhow::Error) -> FileOutcome {
    FileOutcome::Errored(format!("{e:#}"))
}
