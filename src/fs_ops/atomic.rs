//! No-replace rename.
//! - Linux (glibc): `renameat2(RENAME_NOREPLACE)`, so the kernel refuses an occupied target.
//! - Elsewhere, or when the filesystem does not support the flag: an lstat check
//!   immediately before a plain `rename`.
//! - Either way an occupied destination surfaces as `io::ErrorKind::AlreadyExists`.
//! - On Unix the destination directory is fsynced after the rename (best-effort).

use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;

use super::util::{fsync_dir, path_occupied};

pub(crate) fn rename_no_replace(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    let done = renameat2_noreplace(src, dst)?;
    #[cfg(not(all(target_os = "linux", target_env = "gnu")))]
    let done = false;

    if !done {
        if path_occupied(dst)? {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("destination already exists: {}", dst.display()),
            ));
        }
        fs::rename(src, dst)?;
    }

    if let Some(parent) = dst.parent() {
        let _ = fsync_dir(parent);
    }
    Ok(())
}

/// Ok(true) when renamed, Ok(false) when the kernel/filesystem lacks RENAME_NOREPLACE.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn renameat2_noreplace(src: &Path, dst: &Path) -> io::Result<bool> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let to_c = |p: &Path| {
        CString::new(p.as_os_str().as_bytes())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains NUL"))
    };
    let src_c = to_c(src)?;
    let dst_c = to_c(dst)?;

    let rc = unsafe {
        libc::renameat2(
            libc::AT_FDCWD,
            src_c.as_ptr(),
            libc::AT_FDCWD,
            dst_c.as_ptr(),
            libc::RENAME_NOREPLACE,
        )
    };
    if rc == 0 {
        return Ok(true);
    }
    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        Some(code) if code == libc::EINVAL || code == libc::ENOSYS => {
            trace!(dst = %dst.display(), "RENAME_NOREPLACE unsupported here; using checked rename");
            Ok(false)
        }
        _ => Err(err),
    }
}
