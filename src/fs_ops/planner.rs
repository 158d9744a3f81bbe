//! Destination directory planning.
//!
//! `root / <date> [/ <EXT>] [/ <size bucket>]`, where the date folder follows the
//! configured `DateFormat`, the extension folder is the upper-cased extension (or
//! `no extension`) and the size folder is the bucket label of the file's current size.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{DateFormat, PolicyConfig};

use super::helpers::io_error_with_help;
use super::size_bucket::size_bucket_label;

/// Folder label for files without an extension.
pub const NO_EXTENSION: &str = "no extension";

/// `2024_03_05` or `05_03_2024`.
pub fn date_folder_name<Tz>(dt: &DateTime<Tz>, format: DateFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format(format.pattern()).to_string()
}

/// Upper-cased extension without the dot, or `no extension`.
/// Dotfiles like `.bashrc` have no extension.
pub fn extension_folder_name(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => ext.to_string_lossy().to_uppercase(),
        _ => NO_EXTENSION.to_string(),
    }
}

/// Compute the target directory for a file; does not touch the filesystem.
pub fn plan_target_dir<Tz>(policy: &PolicyConfig, src: &Path, dt: &DateTime<Tz>, size: u64) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut dir = policy.root.join(date_folder_name(dt, policy.date_format));
    if policy.group_by_extension {
        dir.push(extension_folder_name(src));
    }
    if policy.group_by_size {
        dir.push(size_bucket_label(size));
    }
    dir
}

/// Create `dir` and any missing ancestors; an existing directory is fine.
pub fn ensure_target_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).map_err(io_error_with_help("create folder", dir))
}
