//! Copy-then-publish used when a rename crosses filesystems:
//! - Checks free space on the destination volume
//! - Copies to a hidden temp file in the destination directory (never clobbers)
//! - Verifies the copied length against the source
//! - Restores timestamps/permissions, then no-replace renames temp -> dest
//!
//! The source is not touched here; the caller removes it only after this succeeds.

use anyhow::anyhow;
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use tracing::debug;

use super::atomic::rename_no_replace;
use super::file_move::MoveFileError;
use super::helpers::io_error_with_help;
use super::io_copy::copy_streaming;
use super::meta::preserve_times_and_mode;
use super::space::ensure_space_for_copy;
use super::util::unique_temp_path;

pub(super) fn safe_copy_into(src: &Path, src_meta: &Metadata, dest: &Path) -> Result<(), MoveFileError> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;

    ensure_space_for_copy(dest_dir, src_meta.len())?;

    let tmp = unique_temp_path(dest_dir);
    let published = copy_and_publish(src, src_meta, &tmp, dest);
    if published.is_err() {
        // Best-effort cleanup; the temp name is ours alone.
        let _ = fs::remove_file(&tmp);
    }
    published
}

fn copy_and_publish(src: &Path, src_meta: &Metadata, tmp: &Path, dest: &Path) -> Result<(), MoveFileError> {
    let bytes = copy_streaming(src, tmp).map_err(io_error_with_help("copy to temporary file", tmp))?;
    if bytes != src_meta.len() {
        return Err(anyhow!(
            "source '{}' changed during copy: expected {} bytes, copied {}",
            src.display(),
            src_meta.len(),
            bytes
        )
        .into());
    }
    preserve_times_and_mode(src_meta, tmp)?;

    match rename_no_replace(tmp, dest) {
        Ok(()) => {
            debug!(tmp = %tmp.display(), dest = %dest.display(), bytes, "published copied file");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(MoveFileError::DestinationTaken(dest.to_path_buf()))
        }
        Err(e) => Err(io_error_with_help("publish copied file", dest)(e).into()),
    }
}
