//! Metadata carry-over for the copy fallback.
//! A renamed file keeps its timestamps for free; a copied one must have them restored,
//! otherwise a second run would classify it under the copy's date.

use anyhow::Result;
use filetime::{FileTime, set_file_times};
use std::fs::{self, Metadata};
use std::path::Path;

use super::helpers::io_error_with_help;

pub(super) fn preserve_times_and_mode(src_meta: &Metadata, dest: &Path) -> Result<()> {
    let mtime = FileTime::from_last_modification_time(src_meta);
    let atime = FileTime::from_last_access_time(src_meta);
    set_file_times(dest, atime, mtime).map_err(io_error_with_help("restore timestamps", dest))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o7777;
        fs::set_permissions(dest, fs::Permissions::from_mode(mode))
            .map_err(io_error_with_help("restore permissions", dest))?;
    }
    #[cfg(not(unix))]
    {
        if src_meta.permissions().readonly() {
            let mut perms = fs::metadata(dest)?.permissions();
            perms.set_readonly(true);
            let _ = fs::set_permissions(dest, perms);
        }
    }
    Ok(())
}
