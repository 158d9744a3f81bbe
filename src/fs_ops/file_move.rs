//! Single-file move.
//! Tries a no-replace rename; on a cross-filesystem error falls back to copy + verify,
//! and removes the source only once the copy is published at the destination.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use super::atomic::rename_no_replace;
use super::copy::safe_copy_into;
use super::helpers::{build_message, io_error_with_help};
use super::util::is_cross_device;

/// How a file reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMethod {
    Renamed,
    Copied,
}

#[derive(Debug, Error)]
pub enum MoveFileError {
    /// Something appeared at the destination between planning and the move.
    #[error("destination appeared before the move: {}", .0.display())]
    DestinationTaken(PathBuf),

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Move `src` to `dest` without replacing anything at `dest`.
///
/// On error the source is still at `src`.
pub fn move_file(src: &Path, dest: &Path) -> Result<MoveMethod, MoveFileError> {
    let rename_err = match rename_no_replace(src, dest) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "renamed file");
            return Ok(MoveMethod::Renamed);
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(MoveFileError::DestinationTaken(dest.to_path_buf()));
        }
        Err(e) => e,
    };

    if !is_cross_device(&rename_err) {
        return Err(anyhow::anyhow!(build_message("move file", src, &rename_err)).into());
    }

    warn!(src = %src.display(), dest = %dest.display(), "cross-filesystem; using copy + remove");
    let src_meta = fs::metadata(src).map_err(io_error_with_help("stat source", src))?;
    safe_copy_into(src, &src_meta, dest)?;

    if let Err(e) = fs::remove_file(src) {
        // Keep exactly one copy: discard ours so the original stays the only one.
        let _ = fs::remove_file(dest);
        return Err(anyhow::anyhow!(
            "{}; copy at '{}' discarded",
            build_message("remove source after copy", src, &e),
            dest.display()
        )
        .into());
    }
    debug!(src = %src.display(), dest = %dest.display(), "copied file and removed source");
    Ok(MoveMethod::Copied)
}
