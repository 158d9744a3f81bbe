use anyhow::anyhow;
use std::path::Path;

use super::helpers::io_error_with_help;

/// Small headroom so a copy never fills the volume to the last block.
const CUSHION: u64 = 4 * 1024 * 1024;

pub(crate) fn format_bytes(n: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let f = n as f64;
    if f >= GB {
        format!("{:.1} GiB", f / GB)
    } else if f >= MB {
        format!("{:.1} MiB", f / MB)
    } else if f >= KB {
        format!("{:.1} KiB", f / KB)
    } else {
        format!("{} B", n)
    }
}

/// Fail early when `dst_dir`'s volume cannot hold `required` bytes plus a cushion.
pub(super) fn ensure_space_for_copy(dst_dir: &Path, required: u64) -> anyhow::Result<()> {
    let free = fs2::available_space(dst_dir).map_err(io_error_with_help("query free space", dst_dir))?;
    if free < required.saturating_add(CUSHION) {
        return Err(anyhow!(
            "not enough free space in '{}': need ~{}, free {}",
            dst_dir.display(),
            format_bytes(required),
            format_bytes(free)
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn formats_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn tiny_copy_fits() {
        let td = tempdir().unwrap();
        ensure_space_for_copy(td.path(), 16).unwrap();
    }

    #[test]
    fn absurd_copy_is_refused() {
        let td = tempdir().unwrap();
        let err = ensure_space_for_copy(td.path(), u64::MAX - 1).unwrap_err();
        assert!(err.to_string().contains("not enough free space"));
    }
}
