//! I/O error enrichment.
//!
//! Turns a bare `io::Error` into a message naming the operation, the path and a
//! short hint, so per-file error lines in a run report are actionable on their own.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create folder", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Hint keyed by raw OS error code, where the platform gives us one.
fn os_hint(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
            libc::EBUSY => Some("resource busy; another process may be using it"),
            libc::ENOENT => Some("path not found"),
            libc::EEXIST => Some("already exists"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ENAMETOOLONG => Some("filename or path too long"),
            libc::EMFILE | libc::ENFILE => Some("too many open files"),
            _ => None,
        }
    }
    #[cfg(windows)]
    {
        match code {
            5 => Some("access denied; check permissions"),
            17 => Some("not same device; cross-filesystem move"),
            32 => Some("sharing violation; file is in use"),
            2 | 3 => Some("path not found"),
            80 | 183 => Some("already exists"),
            112 => Some("insufficient disk space"),
            19 => Some("write protected / read-only media"),
            206 => Some("filename or path too long"),
            _ => None,
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// Format `op 'path': error — hint [os code: N]`.
pub(crate) fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = match e.raw_os_error() {
        Some(code) => os_hint(code),
        None => kind_hint(e.kind()),
    };
    if let Some(h) = hint {
        msg.push_str(" — ");
        msg.push_str(h);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Adapter for anyhow::Result code: `.map_err(io_error_with_help(op, path))`.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// Adapter for io::Result code; keeps the original ErrorKind so callers can still match on it.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_hint_without_os_code() {
        let e = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let msg = build_message("move file", Path::new("/x/a.txt"), &e);
        assert!(msg.starts_with("move file '/x/a.txt': nope"));
        assert!(msg.contains("permission denied"));
        assert!(!msg.contains("os code"));
    }

    #[cfg(unix)]
    #[test]
    fn os_code_is_appended() {
        let e = io::Error::from_raw_os_error(libc::ENOSPC);
        let msg = build_message("copy", Path::new("/y"), &e);
        assert!(msg.contains("insufficient space"));
        assert!(msg.contains(&format!("[os code: {}]", libc::ENOSPC)));
    }

    #[test]
    fn io_variant_keeps_kind() {
        let e = io::Error::new(io::ErrorKind::AlreadyExists, "taken");
        let mapped = io_error_with_help_io("rename", Path::new("/z"))(e);
        assert_eq!(mapped.kind(), io::ErrorKind::AlreadyExists);
        assert!(mapped.to_string().contains("rename '/z'"));
    }
}
