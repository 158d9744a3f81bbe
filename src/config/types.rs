//! Core configuration types.
//! - PolicyConfig is the immutable per-run policy handed to the executor.
//! - Config wraps it with the front end's logging settings.
//! - DateFormat and LogLevel carry simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Order of the components in a date-folder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `YYYY_MM_DD`
    #[default]
    YearMonthDay,
    /// `DD_MM_YYYY`
    DayMonthYear,
}

impl DateFormat {
    /// chrono format string producing the folder name.
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::YearMonthDay => "%Y_%m_%d",
            DateFormat::DayMonthYear => "%d_%m_%Y",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yyyy_mm_dd" | "year_month_day" | "ymd" => Some(DateFormat::YearMonthDay),
            "dd_mm_yyyy" | "day_month_year" | "dmy" => Some(DateFormat::DayMonthYear),
            _ => None,
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateFormat::YearMonthDay => "YYYY_MM_DD",
            DateFormat::DayMonthYear => "DD_MM_YYYY",
        })
    }
}

impl FromStr for DateFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("invalid date format: '{s}' (expected YYYY_MM_DD or DD_MM_YYYY)")
        })
    }
}

/// Immutable policy for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Directory being organized; date folders are created directly inside it
    pub root: PathBuf,
    /// Also pick up files from subfolders when collecting
    pub recurse: bool,
    pub date_format: DateFormat,
    /// Add an upper-cased extension folder below the date folder
    pub group_by_extension: bool,
    /// Add a size-bucket folder below the date (and extension) folder
    pub group_by_size: bool,
    /// Reap directories left empty once the batch is done
    pub delete_empty_dirs: bool,
    /// Classify by creation time where the platform reports it; otherwise modification time
    pub prefer_creation_time: bool,
    /// Plan and report without touching the filesystem
    pub dry_run: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            recurse: false,
            date_format: DateFormat::YearMonthDay,
            group_by_extension: false,
            group_by_size: false,
            delete_empty_dirs: true,
            prefer_creation_time: true,
            dry_run: false,
        }
    }
}

impl PolicyConfig {
    /// Policy rooted at `root`; other fields use defaults.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}

/// Runtime configuration used by the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    pub policy: PolicyConfig,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: PolicyConfig::default(),
            log_level: LogLevel::Normal,
            log_file: paths::default_log_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_format_accepts_both_spellings() {
        assert_eq!(DateFormat::parse("YYYY_MM_DD"), Some(DateFormat::YearMonthDay));
        assert_eq!(DateFormat::parse("dmy"), Some(DateFormat::DayMonthYear));
        assert_eq!(
            "day_month_year".parse::<DateFormat>(),
            Ok(DateFormat::DayMonthYear)
        );
        assert!("MM_DD_YYYY".parse::<DateFormat>().is_err());
    }

    #[test]
    fn date_format_display_roundtrips() {
        for f in [DateFormat::YearMonthDay, DateFormat::DayMonthYear] {
            assert_eq!(f.to_string().parse::<DateFormat>(), Ok(f));
        }
    }

    #[test]
    fn policy_defaults() {
        let p = PolicyConfig::new("/data");
        assert_eq!(p.root, PathBuf::from("/data"));
        assert!(!p.recurse);
        assert!(p.delete_empty_dirs);
        assert!(p.prefer_creation_time);
        assert!(!p.dry_run);
    }

    #[test]
    fn loglevel_parse_various_strings() {
        assert_eq!(LogLevel::parse("QUIET"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse("verbose"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("loud"), None);
    }
}
