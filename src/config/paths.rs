//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.

use dirs::{config_dir, data_dir};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "DATE_SORT_CONFIG";

/// Config path in effect: `$DATE_SORT_CONFIG` if set, else the OS default.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(p));
    }
    if let Some(mut base) = config_dir() {
        base.push("date_sort");
        base.push("config.xml");
        Some(base)
    } else {
        std::env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("date_sort")
                .join("config.xml")
        })
    }
}

/// OS-appropriate default log file path (data dir).
pub fn default_log_path() -> Option<PathBuf> {
    if let Some(mut base) = data_dir() {
        base.push("date_sort");
        base.push("date_sort.log");
        Some(base)
    } else {
        std::env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join("date_sort")
                .join("date_sort.log")
        })
    }
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn env_var_wins_for_config_path() {
        let td = tempdir().unwrap();
        let explicit = td.path().join("custom.xml");
        unsafe { std::env::set_var(CONFIG_ENV, &explicit) };
        let got = default_config_path();
        unsafe { std::env::remove_var(CONFIG_ENV) };
        assert_eq!(got, Some(explicit));
    }

    #[test]
    fn default_log_path_names_file() {
        if let Some(p) = default_log_path() {
            assert!(p.ends_with("date_sort/date_sort.log"));
        }
    }

    #[cfg(unix)]
    #[test]
    fn detects_symlinked_ancestor() {
        let td = tempdir().unwrap();
        let real = td.path().join("real");
        fs::create_dir_all(&real).unwrap();
        let link = td.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        assert!(path_has_symlink_ancestor(&link.join("x.log")).unwrap());
        assert!(!path_has_symlink_ancestor(&real.join("x.log")).unwrap());
    }
}
