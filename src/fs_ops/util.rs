use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Hidden temp name inside `dst_dir` for copy fallbacks: `.date_sort.<pid>.<nanos>.<seq>.tmp`.
pub(super) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    dst_dir.join(format!(".date_sort.{pid}.{nanos}.{seq}.tmp"))
}

/// std::io::ErrorKind has no stable CrossesDevices match on all toolchains,
/// so detect EXDEV / ERROR_NOT_SAME_DEVICE via raw OS error codes.
pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// True if anything (file, directory, dangling symlink) sits at `path`.
/// Uses lstat so a dangling symlink counts as occupied and is never replaced.
pub fn path_occupied(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Same-file check by canonical path. Resolution failure on either side means "different".
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(ra), Ok(rb)) => ra == rb,
        (ra, rb) => {
            trace!(a = %a.display(), b = %b.display(), a_ok = ra.is_ok(), b_ok = rb.is_ok(), "same-file check: canonicalize failed, assuming different");
            false
        }
    }
}
