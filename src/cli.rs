//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Flags override values from the XML config; unset flags leave them alone.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, DateFormat, LogLevel};

/// Sort files into date-named folders.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Sort files into date folders (YYYY_MM_DD) without overwriting anything")]
pub struct Args {
    /// Directory to organize (defaults to the configured root, else the current directory).
    #[arg(value_name = "ROOT", value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Also sort files found in subfolders.
    #[arg(short = 'r', long)]
    pub recurse: bool,

    /// Date folder format: ymd (YYYY_MM_DD) or dmy (DD_MM_YYYY).
    #[arg(long = "format", value_name = "FORMAT", help = "Date folder format: ymd or dmy")]
    pub date_format: Option<DateFormat>,

    /// Add an upper-cased extension folder below the date folder.
    #[arg(short = 'e', long)]
    pub by_extension: bool,

    /// Add a size-bucket folder (e.g. "2 MB") below the date/extension folder.
    #[arg(short = 's', long)]
    pub by_size: bool,

    /// Keep folders that are empty after the run.
    #[arg(long)]
    pub keep_empty_dirs: bool,

    /// Classify by modification time even where creation time is available.
    #[arg(long)]
    pub use_modified_time: bool,

    /// Dry-run: report planned moves but do not modify the filesystem.
    #[arg(long, help = "Show what would be done, but do not modify files/directories")]
    pub dry_run: bool,

    /// Print the files a run would process, then exit.
    #[arg(long)]
    pub list: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where date_sort looks for its config file (or DATE_SORT_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location used by date_sort and exit")]
    pub print_config: bool,

    /// Write a template config file at the config location, then exit.
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        let policy = &mut cfg.policy;
        if let Some(root) = &self.root {
            policy.root = root.clone();
        }
        if self.recurse {
            policy.recurse = true;
        }
        if let Some(fmt) = self.date_format {
            policy.date_format = fmt;
        }
        if self.by_extension {
            policy.group_by_extension = true;
        }
        if self.by_size {
            policy.group_by_size = true;
        }
        if self.keep_empty_dirs {
            policy.delete_empty_dirs = false;
        }
        if self.use_modified_time {
            policy.prefer_creation_time = false;
        }
        if self.dry_run {
            policy.dry_run = true;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
